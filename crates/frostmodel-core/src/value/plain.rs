//! Structural helpers over plain data.
//!
//! Only records and lists are plain data. Models and opaque objects are left
//! untouched by `deep_freeze` and shared by `deep_copy`. Cyclic plain-data
//! graphs are not supported.

use crate::value::Value;

/// True iff `value` is a plain data object (a `Record`).
#[must_use]
pub const fn is_plain_data(value: &Value) -> bool {
    matches!(value, Value::Record(_))
}

/// Freeze a record or list and everything reachable from it through plain
/// data. Other shapes are returned unchanged. Idempotent.
pub fn deep_freeze(value: Value) -> Value {
    match &value {
        Value::Record(record) => {
            record.freeze();
            record.values().into_iter().for_each(freeze_child);
        }
        Value::List(list) => {
            list.freeze();
            list.items().into_iter().for_each(freeze_child);
        }
        _ => {}
    }

    value
}

fn freeze_child(child: Value) {
    if !child.is_null() && !child.is_frozen() {
        deep_freeze(child);
    }
}

/// Copy records and lists recursively into fresh, unfrozen containers.
/// Primitives are copied; models and opaque objects are shared.
#[must_use]
pub fn deep_copy(value: &Value) -> Value {
    match value {
        Value::Record(record) => Value::Record(
            record
                .entries()
                .into_iter()
                .map(|(key, value)| (key, deep_copy(&value)))
                .collect(),
        ),
        Value::List(list) => Value::List(list.items().iter().map(deep_copy).collect()),
        other => other.clone(),
    }
}
