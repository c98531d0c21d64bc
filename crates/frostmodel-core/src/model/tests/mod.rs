
use crate::value::Value;

fn text(value: &str) -> Value {
    Value::from(value)
}
