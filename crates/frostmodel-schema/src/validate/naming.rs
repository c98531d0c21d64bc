use crate::{MAX_MODEL_NAME_LEN, MAX_PROPERTY_NAME_LEN};

/// Ensure model names are non-empty, ASCII, and within the maximum length.
pub(crate) fn validate_model_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("model name is empty".to_string());
    }
    if name.len() > MAX_MODEL_NAME_LEN {
        return Err(format!(
            "model name '{name}' exceeds max length {MAX_MODEL_NAME_LEN}"
        ));
    }
    if !name.is_ascii() {
        return Err(format!("model name '{name}' must be ASCII"));
    }

    Ok(())
}

/// Ensure property keys are non-empty and within the maximum length.
pub(crate) fn validate_property_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("property key is empty".to_string());
    }
    if key.len() > MAX_PROPERTY_NAME_LEN {
        return Err(format!(
            "property key '{key}' exceeds max length {MAX_PROPERTY_NAME_LEN}"
        ));
    }

    Ok(())
}
