//! Reusable field validators
//!
//! Each validator receives the field name and its JSON value and returns a
//! message on failure. Validators only check values of the type they
//! understand and pass anything else through, so a missing value is only
//! reported by [`required`].

use crate::core::field::FieldFormat;
use serde_json::Value;

/// Validator: field is present and not blank
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value {
        Value::Null => Err("is required".to_string()),
        Value::String(s) if s.trim().is_empty() => Err("is required".to_string()),
        _ => Ok(()),
    }
}

/// Validator: number must be greater than zero
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value.as_f64() {
        Some(num) if num <= 0.0 => Err(format!("must be greater than 0 (got {})", num)),
        _ => Ok(()),
    }
}

/// Validator: number must not be negative
pub fn non_negative() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value.as_f64() {
        Some(num) if num < 0.0 => Err(format!("must not be negative (got {})", num)),
        _ => Ok(()),
    }
}

/// Validator: string length (in characters) must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        let Some(s) = value.as_str() else {
            return Ok(());
        };
        let len = s.chars().count();
        if len < min {
            Err(format!("must be at least {} characters (got {})", min, len))
        } else if len > max {
            Err(format!("must be at most {} characters (got {})", max, len))
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be within an inclusive range
pub fn range(
    min: f64,
    max: f64,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_f64() {
        Some(num) if num < min || num > max => {
            Err(format!("must be between {} and {} (got {})", min, max, num))
        }
        _ => Ok(()),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if !allowed.contains(&s) => Err(format!(
            "must be one of {} (got {})",
            allowed.join(", "),
            s
        )),
        _ => Ok(()),
    }
}

/// Validator: date string must match a chrono format
pub fn date_format(
    format: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if chrono::NaiveDate::parse_from_str(s, format).is_err() => {
            Err(format!("must be a date formatted as {} (got {})", format, s))
        }
        _ => Ok(()),
    }
}

/// Validator: string must match a [`FieldFormat`]
pub fn format(
    field_format: FieldFormat,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if !field_format.matches(s) => Err(format!("must be {}", field_format.label())),
        _ => Ok(()),
    }
}
