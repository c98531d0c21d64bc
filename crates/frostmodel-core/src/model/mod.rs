//! Model runtime: the shared `Model` read surface, resolved `ModelType`
//! handles, and the two model flavors.
//!
//! Construction goes through `base::materialize`, which visits every declared
//! property once and hands it to the flavor's `AssignProperty` impl. The
//! per-shape decisions for nested models live in `coerce`.

mod base;
mod coerce;
mod immutable;
mod mutable;

#[cfg(test)]
mod tests;

use crate::{
    error::ModelError,
    value::{Record, Value},
};
use derive_more::From;
use frostmodel_schema::{node::Schema, registry::SchemaProvider, types::Flavor};
use std::{fmt, sync::Arc};

// re-exports
pub use immutable::ImmutableModel;
pub use mutable::MutableModel;

///
/// Model
///
/// Read surface shared by both flavors and by `ModelRef`.
///

pub trait Model {
    fn model_type(&self) -> &ModelType;

    /// Current value of a field, or `None` when the field is unset.
    fn get(&self, key: &str) -> Option<Value>;

    /// Fresh, unfrozen record holding the current field handles.
    fn to_record(&self) -> Record;

    fn is_frozen(&self) -> bool;

    /// Direct write of a single field.
    fn assign(&self, key: &str, value: Value) -> Result<(), ModelError>;
}

///
/// CloneDepth
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CloneDepth {
    /// Scalar containers alias and nested instances are shared.
    #[default]
    Shallow,

    /// Every field is copied into independently owned data.
    Deep,
}

///
/// ModelType
///
/// Resolved schema of a model type together with the provider used to
/// resolve its nested model types.
///

#[derive(Clone)]
pub struct ModelType {
    provider: Arc<dyn SchemaProvider>,
    schema: Arc<Schema>,
}

impl ModelType {
    pub fn resolve(provider: &Arc<dyn SchemaProvider>, name: &str) -> Result<Self, ModelError> {
        let schema = provider.schema(name)?;

        Ok(Self {
            provider: Arc::clone(provider),
            schema,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    #[must_use]
    pub fn flavor(&self) -> Flavor {
        self.schema.flavor()
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Resolve another model type through the same provider.
    pub fn nested(&self, name: &str) -> Result<Self, ModelError> {
        Self::resolve(&self.provider, name)
    }

    /// True when an instance with `schema` may be stored where this type is
    /// declared: the same type or one of its descendants.
    #[must_use]
    pub fn accepts(&self, schema: &Schema) -> bool {
        schema.extends(self.name())
    }

    /// Construct an instance of this type with the matching flavor.
    pub fn construct(&self, data: &Record) -> Result<ModelRef, ModelError> {
        match self.flavor() {
            Flavor::Immutable => ImmutableModel::new(self.clone(), data).map(ModelRef::from),
            Flavor::Mutable => MutableModel::new(self.clone(), data).map(ModelRef::from),
        }
    }

    pub(crate) fn expect_flavor(&self, expected: Flavor) -> Result<(), ModelError> {
        let actual = self.flavor();
        if actual == expected {
            Ok(())
        } else {
            Err(ModelError::FlavorMismatch {
                model: self.name().to_string(),
                expected,
                actual,
            })
        }
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.name())
            .field("flavor", &self.flavor())
            .finish_non_exhaustive()
    }
}

///
/// ModelRef
///
/// Handle to an instance of either flavor.
/// Cloning the handle shares the instance.
///

#[derive(Clone, Debug, From, PartialEq)]
pub enum ModelRef {
    Immutable(ImmutableModel),
    Mutable(MutableModel),
}

impl ModelRef {
    #[must_use]
    pub const fn flavor(&self) -> Flavor {
        match self {
            Self::Immutable(_) => Flavor::Immutable,
            Self::Mutable(_) => Flavor::Mutable,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.model_type().name()
    }

    /// True when both handles point at the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Immutable(a), Self::Immutable(b)) => a.ptr_eq(b),
            (Self::Mutable(a), Self::Mutable(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    #[must_use]
    pub const fn as_immutable(&self) -> Option<&ImmutableModel> {
        match self {
            Self::Immutable(model) => Some(model),
            Self::Mutable(_) => None,
        }
    }

    #[must_use]
    pub const fn as_mutable(&self) -> Option<&MutableModel> {
        match self {
            Self::Mutable(model) => Some(model),
            Self::Immutable(_) => None,
        }
    }
}

impl Model for ModelRef {
    fn model_type(&self) -> &ModelType {
        match self {
            Self::Immutable(model) => model.model_type(),
            Self::Mutable(model) => model.model_type(),
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        match self {
            Self::Immutable(model) => model.get(key),
            Self::Mutable(model) => model.get(key),
        }
    }

    fn to_record(&self) -> Record {
        match self {
            Self::Immutable(model) => model.to_record(),
            Self::Mutable(model) => model.to_record(),
        }
    }

    fn is_frozen(&self) -> bool {
        match self {
            Self::Immutable(model) => model.is_frozen(),
            Self::Mutable(model) => model.is_frozen(),
        }
    }

    fn assign(&self, key: &str, value: Value) -> Result<(), ModelError> {
        match self {
            Self::Immutable(model) => model.assign(key, value),
            Self::Mutable(model) => model.assign(key, value),
        }
    }
}
