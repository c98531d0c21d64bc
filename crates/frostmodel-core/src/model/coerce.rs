//! Storage decisions for model-ref properties.
//!
//! Every supplied value is classified once into `Supplied`, then matched
//! against the declaring flavor: `into_frozen` for immutable owners,
//! `adopt` for mutable construction and `merge` for mutable `set`.

use crate::{
    error::ModelError,
    model::{CloneDepth, ImmutableModel, Model, ModelRef, ModelType, MutableModel},
    value::{Record, Value, ValueKind},
};
use frostmodel_schema::types::Flavor;
use tracing::trace;

const EXPECTED_SHAPE: &str = "record or model instance";

///
/// Supplied
/// Runtime shape of the value supplied for a model-ref property.
///

#[derive(Debug)]
pub(crate) enum Supplied {
    Absent,
    Data(Record),
    Instance(ModelRef),
    Invalid(ValueKind),
}

impl Supplied {
    pub(crate) fn classify(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Record(record)) => Self::Data(record.clone()),
            Some(Value::Model(model)) => Self::Instance(model.clone()),
            Some(other) => Self::Invalid(other.kind()),
        }
    }
}

///
/// Merge
/// Outcome of merging supplied data into a mutable owner's field.
///

#[derive(Debug)]
pub(crate) enum Merge {
    Skip,
    Merged,
    Replace(ModelRef),
}

/// Immutable owner: whatever gets stored must already be frozen and must not
/// alias any live mutable instance.
pub(crate) fn into_frozen(
    nested: &ModelType,
    supplied: Supplied,
) -> Result<Option<ModelRef>, ModelError> {
    match supplied {
        Supplied::Absent => Ok(None),
        Supplied::Instance(instance) => {
            ensure_compatible(nested, &instance)?;

            match instance {
                ModelRef::Immutable(model) => Ok(Some(model.into())),
                ModelRef::Mutable(model) => {
                    let copy = model.duplicate(CloneDepth::Deep)?;
                    copy.freeze()?;

                    Ok(Some(copy.into()))
                }
            }
        }
        Supplied::Data(record) => match nested.flavor() {
            Flavor::Immutable => Ok(Some(ImmutableModel::new(nested.clone(), &record)?.into())),
            Flavor::Mutable => {
                let model = MutableModel::new(nested.clone(), &record)?;
                model.freeze()?;

                Ok(Some(model.into()))
            }
        },
        Supplied::Invalid(kind) => Err(invalid_shape(kind)),
    }
}

/// Mutable construction: instances are adopted by reference, data builds a
/// fresh instance of the declared type.
pub(crate) fn adopt(
    nested: &ModelType,
    supplied: Supplied,
) -> Result<Option<ModelRef>, ModelError> {
    match supplied {
        Supplied::Absent => Ok(None),
        Supplied::Instance(instance) => {
            ensure_compatible(nested, &instance)?;

            Ok(Some(instance))
        }
        Supplied::Data(record) => nested.construct(&record).map(Some),
        Supplied::Invalid(kind) => Err(invalid_shape(kind)),
    }
}

/// Mutable `set`: data is merged into the current nested instance when there
/// is one, keeping the identity of a nested mutable instance.
pub(crate) fn merge(
    nested: &ModelType,
    current: Option<ModelRef>,
    supplied: Supplied,
) -> Result<Merge, ModelError> {
    match supplied {
        Supplied::Absent => Ok(Merge::Skip),
        Supplied::Instance(instance) => {
            ensure_compatible(nested, &instance)?;

            Ok(Merge::Replace(instance))
        }
        Supplied::Data(record) => match current {
            Some(ModelRef::Mutable(model)) => {
                trace!(model = model.name(), "merging into nested mutable model");
                model.set(&record)?;

                Ok(Merge::Merged)
            }
            Some(ModelRef::Immutable(model)) => Ok(Merge::Replace(model.set(&record)?.into())),
            None => nested.construct(&record).map(Merge::Replace),
        },
        Supplied::Invalid(kind) => Err(invalid_shape(kind)),
    }
}

/// Direct assignment: only an instance or `Null` (unset) is accepted.
pub(crate) fn instance_or_unset(
    nested: &ModelType,
    value: Value,
) -> Result<Option<ModelRef>, ModelError> {
    match value {
        Value::Null => Ok(None),
        Value::Model(instance) => {
            ensure_compatible(nested, &instance)?;

            Ok(Some(instance))
        }
        other => Err(ModelError::InvalidShape {
            expected: "model instance or null",
            actual: other.kind().label(),
        }),
    }
}

fn ensure_compatible(nested: &ModelType, instance: &ModelRef) -> Result<(), ModelError> {
    let actual = instance.model_type();
    if nested.accepts(actual.schema()) {
        return Ok(());
    }

    Err(ModelError::IncompatibleModel {
        expected: nested.name().to_string(),
        actual: actual.name().to_string(),
    })
}

const fn invalid_shape(kind: ValueKind) -> ModelError {
    ModelError::InvalidShape {
        expected: EXPECTED_SHAPE,
        actual: kind.label(),
    }
}
