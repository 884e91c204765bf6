//! Reusable field validators
//!
//! Field validators see one field of the payload (missing fields are `null`);
//! record validators see the whole object.

use serde_json::Value;

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Validator: field is required (not null, not blank)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if is_blank(value) {
            Err(format!("The {field} is required."))
        } else {
            Ok(())
        }
    }
}

/// Validator: string must not exceed `max` characters
pub fn max_length(max: usize) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if s.chars().count() > max => Err(format!(
            "The {field} shouldn't have more than {max} characters."
        )),
        _ => Ok(()),
    }
}

/// Validator: string length must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if len < min {
                Err(format!(
                    "The {field} should have at least {min} characters (currently {len})."
                ))
            } else if len > max {
                Err(format!(
                    "The {field} shouldn't have more than {max} characters (currently {len})."
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string must be an RFC 3339 timestamp
pub fn date_time() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            chrono::DateTime::parse_from_rfc3339(s)
                .map(|_| ())
                .map_err(|_| format!("The {field} must be an RFC 3339 date and time (got '{s}')."))
        } else {
            Ok(())
        }
    }
}

/// Record validator: two string fields must not be equal
pub fn fields_differ(
    first: &'static str,
    second: &'static str,
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |record: &Value| {
        let a = record.get(first).and_then(Value::as_str);
        let b = record.get(second).and_then(Value::as_str);
        match (a, b) {
            (Some(a), Some(b)) if a == b => Err(message.to_string()),
            _ => Ok(()),
        }
    }
}
