use crate::{
    error::ModelError,
    model::{
        CloneDepth, Model, ModelRef, ModelType,
        base::{AssignProperty, materialize},
        coerce::{self, Merge, Supplied},
    },
    value::{Record, Value, deep_copy, deep_freeze},
};
use frostmodel_schema::{
    node::{PropertyDeclaration, PropertyKind},
    types::Flavor,
};
use parking_lot::RwLock;
use std::{collections::BTreeMap, fmt, sync::Arc};
use tracing::{debug, trace};

///
/// MutableModel
///
/// Instance of a mutable model type. Fields change in place through `set`
/// and `assign` until `freeze` is called; after that `set` is absorbed and
/// `assign` fails. Cloning the handle shares the instance.
///
/// The instance lock is never held while another instance is visited, so
/// nested `set`, `duplicate` and `freeze` calls cannot deadlock on it.
///

#[derive(Clone)]
pub struct MutableModel(Arc<MutableInner>);

struct MutableInner {
    ty: ModelType,
    state: RwLock<MutableState>,
}

struct MutableState {
    frozen: bool,
    fields: BTreeMap<String, Value>,
}

impl MutableModel {
    const TARGET: &'static str = "frozen model";

    pub fn new(ty: ModelType, data: &Record) -> Result<Self, ModelError> {
        ty.expect_flavor(Flavor::Mutable)?;

        let mut fields = LiveFields::default();
        materialize(&ty, data, &mut fields)?;
        trace!(model = ty.name(), fields = fields.0.len(), "mutable model constructed");

        Ok(Self(Arc::new(MutableInner {
            ty,
            state: RwLock::new(MutableState {
                frozen: false,
                fields: fields.0,
            }),
        })))
    }

    /// Merge `partial` into this instance.
    ///
    /// Only declared keys whose value is present and non-null are visited.
    /// Nested data is merged into the current nested instance where one
    /// exists. On a frozen instance the call is absorbed and `self` is
    /// returned unchanged. Fields visited before an error keep their new
    /// values.
    pub fn set(&self, partial: &Record) -> Result<&Self, ModelError> {
        if self.is_frozen() {
            trace!(model = self.name(), "set absorbed by frozen model");
            return Ok(self);
        }

        let ty = &self.0.ty;
        for declaration in ty.schema().properties() {
            let key = declaration.key();
            let Some(value) = partial.get(key).filter(|v| !v.is_null()) else {
                continue;
            };

            self.merge_property(ty, declaration, value)
                .map_err(|err| err.with_field(key))?;
        }

        Ok(self)
    }

    /// Copy this instance.
    ///
    /// `Shallow` builds a new instance from the current field handles, so
    /// scalar containers and nested instances are shared with `self`.
    /// `Deep` copies scalars, deep-duplicates nested mutable instances and
    /// duplicates nested immutable ones. The copy is never frozen.
    pub fn duplicate(&self, depth: CloneDepth) -> Result<Self, ModelError> {
        let data: Record = match depth {
            CloneDepth::Shallow => self.to_record(),
            CloneDepth::Deep => self
                .isolated()?
                .into_iter()
                .map(|(declaration, value)| (declaration.key(), value))
                .collect(),
        };

        Self::new(self.0.ty.clone(), &data)
    }

    /// Turn this instance into a frozen snapshot.
    ///
    /// Fields are first replaced by isolated copies, so nothing reachable
    /// from the snapshot is shared with the live graph; scalar copies are
    /// deep-frozen and nested mutable copies are frozen recursively.
    /// Freezing a frozen instance is a no-op.
    pub fn freeze(&self) -> Result<&Self, ModelError> {
        if self.is_frozen() {
            return Ok(self);
        }

        let mut snapshot = BTreeMap::new();
        for (declaration, value) in self.isolated()? {
            let key = declaration.key();
            let value = match (declaration.kind(), value) {
                (PropertyKind::ModelRef { .. }, Value::Model(ModelRef::Mutable(model))) => {
                    model.freeze().map_err(|err| err.with_field(key))?;
                    Value::Model(model.into())
                }
                (PropertyKind::Scalar, value) => deep_freeze(value),
                (PropertyKind::ModelRef { .. }, value) => value,
            };

            snapshot.insert(key.to_string(), value);
        }

        {
            let mut state = self.0.state.write();
            state.fields = snapshot;
            state.frozen = true;
        }
        debug!(model = self.name(), "mutable model frozen");

        Ok(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.0.ty.name()
    }

    /// Declared keys that hold a value, in key order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.state.read().fields.keys().cloned().collect()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn snapshot(&self) -> BTreeMap<String, Value> {
        self.0.state.read().fields.clone()
    }

    /// Independently owned copy of every set field, paired with its
    /// declaration, in schema order.
    fn isolated(&self) -> Result<Vec<(&PropertyDeclaration, Value)>, ModelError> {
        let snapshot = self.snapshot();
        let mut isolated = Vec::with_capacity(snapshot.len());

        for declaration in self.0.ty.schema().properties() {
            let key = declaration.key();
            let Some(value) = snapshot.get(key) else {
                continue;
            };

            let value = isolate(declaration, value).map_err(|err| err.with_field(key))?;
            isolated.push((declaration, value));
        }

        Ok(isolated)
    }

    fn merge_property(
        &self,
        ty: &ModelType,
        declaration: &PropertyDeclaration,
        value: Value,
    ) -> Result<(), ModelError> {
        let key = declaration.key();

        match declaration.kind() {
            PropertyKind::Scalar => self.write_field(key, value),
            PropertyKind::ModelRef { model } => {
                let nested = ty.nested(model)?;
                let current = self.get(key).and_then(|v| v.as_model().cloned());

                match coerce::merge(&nested, current, Supplied::classify(Some(&value)))? {
                    Merge::Skip | Merge::Merged => {}
                    Merge::Replace(replacement) => {
                        self.write_field(key, Value::Model(replacement));
                    }
                }
            }
        }

        Ok(())
    }

    // a freeze that lands between the frozen check in `set` and this write
    // wins; the write is dropped
    fn write_field(&self, key: &str, value: Value) {
        let mut state = self.0.state.write();
        if !state.frozen {
            state.fields.insert(key.to_string(), value);
        }
    }
}

fn isolate(declaration: &PropertyDeclaration, value: &Value) -> Result<Value, ModelError> {
    match (declaration.kind(), value) {
        (PropertyKind::ModelRef { .. }, Value::Model(ModelRef::Mutable(model))) => {
            model.duplicate(CloneDepth::Deep).map(Value::from)
        }
        (PropertyKind::ModelRef { .. }, Value::Model(ModelRef::Immutable(model))) => {
            model.duplicate().map(Value::from)
        }
        _ => Ok(deep_copy(value)),
    }
}

impl Model for MutableModel {
    fn model_type(&self) -> &ModelType {
        &self.0.ty
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.0.state.read().fields.get(key).cloned()
    }

    fn to_record(&self) -> Record {
        self.snapshot().into_iter().collect()
    }

    fn is_frozen(&self) -> bool {
        self.0.state.read().frozen
    }

    fn assign(&self, key: &str, value: Value) -> Result<(), ModelError> {
        let ty = &self.0.ty;
        let declaration = ty
            .schema()
            .property(key)
            .ok_or_else(|| ModelError::UnknownProperty {
                model: ty.name().to_string(),
                key: key.to_string(),
            })?;

        let value = match declaration.kind() {
            PropertyKind::Scalar => Some(value),
            PropertyKind::ModelRef { model } => {
                let nested = ty.nested(model)?;
                coerce::instance_or_unset(&nested, value)?.map(Value::Model)
            }
        };

        let mut state = self.0.state.write();
        if state.frozen {
            return Err(ModelError::read_only(Self::TARGET, key));
        }

        match value {
            Some(value) => state.fields.insert(key.to_string(), value),
            None => state.fields.remove(key),
        };

        Ok(())
    }
}

impl PartialEq for MutableModel {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.name() == other.name() && self.snapshot() == other.snapshot())
    }
}

impl fmt::Debug for MutableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.snapshot();
        let mut s = f.debug_struct(self.name());
        for (key, value) in &state {
            s.field(key, value);
        }

        s.field("frozen", &self.is_frozen()).finish()
    }
}

///
/// LiveFields
/// Construction target for mutable instances.
///

#[derive(Default)]
struct LiveFields(BTreeMap<String, Value>);

impl AssignProperty for LiveFields {
    fn assign_property(
        &mut self,
        ty: &ModelType,
        declaration: &PropertyDeclaration,
        value: Option<&Value>,
    ) -> Result<(), ModelError> {
        let stored = match declaration.kind() {
            PropertyKind::Scalar => value.cloned(),
            PropertyKind::ModelRef { model } => {
                let nested = ty.nested(model)?;

                coerce::adopt(&nested, Supplied::classify(value))?.map(Value::Model)
            }
        };

        if let Some(stored) = stored {
            self.0.insert(declaration.key().to_string(), stored);
        }

        Ok(())
    }
}
