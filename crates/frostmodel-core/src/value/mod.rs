mod opaque;
mod plain;
mod shared;

#[cfg(feature = "json")]
mod json;


use crate::model::{ImmutableModel, Model, ModelRef, MutableModel};
use derive_more::Display;

// re-exports
pub use opaque::Opaque;
pub use plain::{deep_copy, deep_freeze, is_plain_data};
pub use shared::{List, Record};

///
/// Value
///
/// Dynamic value stored in model fields and construction data.
///
/// Primitives are copied on clone. `List`, `Record`, `Model` and `Opaque`
/// are handles: cloning a value aliases the same container or instance.
/// `PartialEq` compares structure; `same` compares identity.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(List),
    Record(Record),
    Model(ModelRef),
    Opaque(Opaque),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Record(_) => ValueKind::Record,
            Self::Model(_) => ValueKind::Model,
            Self::Opaque(_) => ValueKind::Opaque,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Primitives and immutable models are always frozen; containers and
    /// mutable models report their own state; opaque objects never are.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        match self {
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Text(_) => true,
            Self::List(list) => list.is_frozen(),
            Self::Record(record) => record.is_frozen(),
            Self::Model(model) => model.is_frozen(),
            Self::Opaque(_) => false,
        }
    }

    /// Identity comparison: handles must point at the same container or
    /// instance; primitives compare by value.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => a.ptr_eq(b),
            (Self::Record(a), Self::Record(b)) => a.ptr_eq(b),
            (Self::Model(a), Self::Model(b)) => a.ptr_eq(b),
            (Self::Opaque(a), Self::Opaque(b)) => a.ptr_eq(b),
            (Self::List(_) | Self::Record(_) | Self::Model(_) | Self::Opaque(_), _)
            | (_, Self::List(_) | Self::Record(_) | Self::Model(_) | Self::Opaque(_)) => false,
            _ => self == other,
        }
    }

    //
    // accessors
    //

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_model(&self) -> Option<&ModelRef> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_immutable(&self) -> Option<&ImmutableModel> {
        match self {
            Self::Model(ModelRef::Immutable(model)) => Some(model),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_mutable(&self) -> Option<&MutableModel> {
        match self {
            Self::Model(ModelRef::Mutable(model)) => Some(model),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Self::Opaque(opaque) => Some(opaque),
            _ => None,
        }
    }
}

///
/// ValueKind
/// Variant label used in shape diagnostics.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Text,
    List,
    Record,
    Model,
    Opaque,
}

impl ValueKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Text => "Text",
            Self::List => "List",
            Self::Record => "Record",
            Self::Model => "Model",
            Self::Opaque => "Opaque",
        }
    }
}

//
// conversions
//

macro_rules! impl_value_from {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f64 => Float,
    &str => Text,
    String => Text,
    List => List,
    Record => Record,
    ModelRef => Model,
    ImmutableModel => Model,
    MutableModel => Model,
    Opaque => Opaque,
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
