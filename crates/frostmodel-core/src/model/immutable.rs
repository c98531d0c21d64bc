use crate::{
    error::ModelError,
    model::{
        Model, ModelType,
        base::{AssignProperty, materialize},
        coerce::{self, Supplied},
    },
    value::{Record, Value, deep_copy, deep_freeze},
};
use frostmodel_schema::{
    node::{PropertyDeclaration, PropertyKind},
    types::Flavor,
};
use std::{collections::BTreeMap, fmt, sync::Arc};
use tracing::trace;

///
/// ImmutableModel
///
/// Instance of an immutable model type. Fields are fixed at construction:
/// scalar data is copied and deep-frozen, nested models are immutable or
/// frozen. Cloning the handle shares the instance.
///

#[derive(Clone)]
pub struct ImmutableModel(Arc<ImmutableInner>);

struct ImmutableInner {
    ty: ModelType,
    fields: BTreeMap<String, Value>,
}

impl ImmutableModel {
    const TARGET: &'static str = "immutable model";

    pub fn new(ty: ModelType, data: &Record) -> Result<Self, ModelError> {
        ty.expect_flavor(Flavor::Immutable)?;

        let mut fields = FrozenFields::default();
        materialize(&ty, data, &mut fields)?;
        trace!(model = ty.name(), fields = fields.0.len(), "immutable model constructed");

        Ok(Self(Arc::new(ImmutableInner {
            ty,
            fields: fields.0,
        })))
    }

    /// Functional update: a new instance built from the current fields
    /// overlaid with every entry of `partial`. `self` is left untouched.
    pub fn set(&self, partial: &Record) -> Result<Self, ModelError> {
        let data = self.to_record();
        for (key, value) in partial.entries() {
            data.insert(key, value)?;
        }

        Self::new(self.0.ty.clone(), &data)
    }

    /// Distinct instance with field-wise equal values. Nested immutable
    /// instances are shared; scalar containers are fresh frozen copies.
    pub fn duplicate(&self) -> Result<Self, ModelError> {
        self.set(&Record::new())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.0.ty.name()
    }

    /// Declared keys that hold a value, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Model for ImmutableModel {
    fn model_type(&self) -> &ModelType {
        &self.0.ty
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.0.fields.get(key).cloned()
    }

    fn to_record(&self) -> Record {
        self.0
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn is_frozen(&self) -> bool {
        true
    }

    fn assign(&self, key: &str, _value: Value) -> Result<(), ModelError> {
        Err(ModelError::read_only(Self::TARGET, key))
    }
}

impl PartialEq for ImmutableModel {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.name() == other.name() && self.0.fields == other.0.fields)
    }
}

impl fmt::Debug for ImmutableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.name());
        for (key, value) in &self.0.fields {
            s.field(key, value);
        }

        s.finish()
    }
}

///
/// FrozenFields
/// Construction target for immutable instances.
///

#[derive(Default)]
struct FrozenFields(BTreeMap<String, Value>);

impl AssignProperty for FrozenFields {
    fn assign_property(
        &mut self,
        ty: &ModelType,
        declaration: &PropertyDeclaration,
        value: Option<&Value>,
    ) -> Result<(), ModelError> {
        let stored = match declaration.kind() {
            PropertyKind::Scalar => value.map(|v| deep_freeze(deep_copy(v))),
            PropertyKind::ModelRef { model } => {
                let nested = ty.nested(model)?;

                coerce::into_frozen(&nested, Supplied::classify(value))?.map(Value::Model)
            }
        };

        if let Some(stored) = stored {
            self.0.insert(declaration.key().to_string(), stored);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::ModelRef, test_support::fixture, value::List};

    #[test]
    fn stores_declared_values_only() {
        let fx = fixture();
        let model = fx.immutable(
            "ImmTest",
            &record! { "id" => 2, "name" => "some name", "surname" => "dropped" },
        );

        assert_eq!(model.get("id"), Some(Value::Int(2)));
        assert_eq!(model.get("name"), Some(Value::from("some name")));
        assert_eq!(model.get("surname"), None);
        assert_eq!(model.keys().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn missing_scalars_stay_unset_and_null_is_kept() {
        let fx = fixture();
        let model = fx.immutable("ImmTest", &record! { "name" => Value::Null });

        assert_eq!(model.get("id"), None);
        assert_eq!(model.get("name"), Some(Value::Null));
    }

    #[test]
    fn copies_and_freezes_plain_objects() {
        let fx = fixture();
        let inner = record! { "c" => 4 };
        let complex = record! { "a" => "something", "b" => inner.clone() };

        let model = fx.immutable("ImmObject", &record! { "complex" => complex.clone() });

        let stored = model.get("complex").unwrap();
        let stored = stored.as_record().unwrap();
        let stored_inner = stored.get("b").unwrap();

        assert!(!stored.ptr_eq(&complex));
        assert!(!stored_inner.as_record().unwrap().ptr_eq(&inner));
        assert_eq!(*stored, complex);
        assert!(stored.is_frozen());
        assert!(stored_inner.is_frozen());
        assert!(!complex.is_frozen());
    }

    #[test]
    fn copies_and_freezes_lists() {
        let fx = fixture();
        let first: List = std::iter::once("something").collect();
        let arr: List = std::iter::once(first.clone()).collect();

        let model = fx.immutable("ImmArray", &record! { "arr" => arr.clone() });

        let stored = model.get("arr").unwrap();
        let stored = stored.as_list().unwrap();
        let stored_first = stored.get(0).unwrap();

        assert!(!stored.ptr_eq(&arr));
        assert!(!stored_first.as_list().unwrap().ptr_eq(&first));
        assert!(stored.is_frozen());
        assert!(stored_first.is_frozen());
        assert!(stored.push("x").unwrap_err().is_read_only());
    }

    #[test]
    fn builds_nested_immutable_models_from_data() {
        let fx = fixture();
        let model = fx.immutable(
            "ImmWithDeep",
            &record! { "deep" => record! { "test" => record! { "id" => 2, "name" => "n" } } },
        );

        let deep = model.get("deep").unwrap();
        let deep = deep.as_immutable().unwrap();
        let test = deep.get("test").unwrap();

        assert_eq!(deep.name(), "ImmWithModel");
        assert_eq!(test.as_immutable().unwrap().get("id"), Some(Value::Int(2)));
    }

    #[test]
    fn shares_supplied_immutable_models() {
        let fx = fixture();
        let test = fx.immutable("ImmTest", &record! { "id" => 2, "name" => "n" });
        let with = fx.immutable("ImmWithModel", &record! { "test" => test.clone() });

        let stored = with.get("test").unwrap();
        assert!(stored.as_immutable().unwrap().ptr_eq(&test));
    }

    #[test]
    fn freezes_a_copy_of_supplied_mutable_models() {
        let fx = fixture();
        let live = fx.mutable("MutTest", &record! { "id" => 1, "name" => "n" });
        let model = fx.immutable("ImmWithMutable", &record! { "mutable" => live.clone() });

        let stored = model.get("mutable").unwrap();
        let stored = stored.as_mutable().unwrap();

        assert!(!stored.ptr_eq(&live));
        assert!(stored.is_frozen());
        assert!(!live.is_frozen());

        live.set(&record! { "name" => "changed" }).unwrap();
        assert_eq!(stored.get("name"), Some(Value::from("n")));
    }

    #[test]
    fn builds_frozen_mutable_models_from_data() {
        let fx = fixture();
        let model = fx.immutable(
            "ImmWithMutable",
            &record! { "mutable" => record! { "id" => 7 } },
        );

        let stored = model.get("mutable").unwrap();
        let stored = stored.as_mutable().unwrap();

        assert!(stored.is_frozen());
        assert_eq!(stored.get("id"), Some(Value::Int(7)));
    }

    #[test]
    fn absent_model_refs_stay_unset() {
        let fx = fixture();

        let missing = fx.immutable("ImmWithModel", &Record::new());
        let null = fx.immutable("ImmWithModel", &record! { "test" => Value::Null });

        assert_eq!(missing.get("test"), None);
        assert_eq!(null.get("test"), None);
        assert_eq!(null.keys().count(), 0);
    }

    #[test]
    fn rejects_a_mutable_model_type() {
        let fx = fixture();

        let err = ImmutableModel::new(fx.model_type("MutTest"), &Record::new()).unwrap_err();

        assert_eq!(
            err,
            ModelError::FlavorMismatch {
                model: "MutTest".to_string(),
                expected: Flavor::Immutable,
                actual: Flavor::Mutable,
            }
        );
    }

    #[test]
    fn nested_shape_errors_carry_the_path() {
        let fx = fixture();

        let err = ImmutableModel::new(
            fx.model_type("ImmWithDeep"),
            &record! { "deep" => record! { "test" => "not a model" } },
        )
        .unwrap_err();

        assert_eq!(err.path(), Some("deep.test"));
        assert!(matches!(err.leaf(), ModelError::InvalidShape { actual: "Text", .. }));
    }

    #[test]
    fn direct_writes_are_rejected() {
        let fx = fixture();
        let model = fx.immutable("ImmTest", &record! { "id" => 2 });

        let err = model.assign("id", Value::Int(3)).unwrap_err();

        assert_eq!(
            err,
            ModelError::ReadOnlyViolation {
                target: "immutable model",
                key: "id".to_string(),
            }
        );
        assert_eq!(model.get("id"), Some(Value::Int(2)));
    }

    #[test]
    fn set_returns_a_new_instance() {
        let fx = fixture();
        let model = fx.immutable("ImmTest", &record! { "id" => 2, "name" => "some name" });

        let updated = model.set(&record! { "name" => "some new name" }).unwrap();

        assert!(!updated.ptr_eq(&model));
        assert_eq!(updated.get("name"), Some(Value::from("some new name")));
        assert_eq!(updated.get("id"), Some(Value::Int(2)));
        assert_eq!(model.get("name"), Some(Value::from("some name")));
    }

    #[test]
    fn set_merges_nested_data_into_a_new_nested_instance() {
        let fx = fixture();
        let model = fx.immutable(
            "ImmWithModel",
            &record! { "test" => record! { "id" => 1, "name" => "a" } },
        );

        let updated = model
            .set(&record! { "test" => record! { "name" => "b" } })
            .unwrap();

        let test = updated.get("test").unwrap();
        // nested data replaces the whole nested instance
        assert_eq!(test.as_immutable().unwrap().get("id"), None);
        assert_eq!(test.as_immutable().unwrap().get("name"), Some(Value::from("b")));
    }

    #[test]
    fn set_null_unsets_model_ref() {
        let fx = fixture();
        let model = fx.immutable(
            "ImmWithModel",
            &record! { "test" => record! { "id" => 1, "name" => "a" } },
        );

        let updated = model.set(&record! { "test" => Value::Null }).unwrap();

        assert_eq!(updated.get("test"), None);
        assert!(model.get("test").unwrap().as_immutable().is_some());
    }

    #[test]
    fn duplicate_is_distinct_and_equal() {
        let fx = fixture();
        let model = fx.immutable(
            "ImmObject",
            &record! { "complex" => record! { "a" => "x", "b" => record! { "c" => 4 } } },
        );

        let copy = model.duplicate().unwrap();

        assert!(!copy.ptr_eq(&model));
        assert_eq!(copy, model);

        let original = model.get("complex").unwrap();
        let copied = copy.get("complex").unwrap();
        assert!(!original.same(&copied));
        assert!(copied.is_frozen());
    }

    #[test]
    fn duplicate_shares_nested_immutable_models() {
        let fx = fixture();
        let model = fx.immutable(
            "ImmWithModel",
            &record! { "test" => record! { "id" => 1 } },
        );

        let copy = model.duplicate().unwrap();

        assert!(model.get("test").unwrap().same(&copy.get("test").unwrap()));
    }

    #[test]
    fn model_ref_reports_flavor_and_frozen_state() {
        let fx = fixture();
        let model: ModelRef = fx.immutable("ImmTest", &record! { "id" => 1 }).into();

        assert_eq!(model.flavor(), Flavor::Immutable);
        assert!(model.is_frozen());
        assert_eq!(model.name(), "ImmTest");
    }
}
