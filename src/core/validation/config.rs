//! Per-entity validation configuration

use crate::core::error::{FieldError, ValidationError};
use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

type FieldValidator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type FieldFilter = Box<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;

/// Filters and validators for the fields of one entity type
///
/// Filters run first and normalize the payload; validators then check the
/// normalized values. Fields are processed in registration order so error
/// lists are stable.
///
/// # Example
/// ```rust,ignore
/// let config = EntityValidationConfig::new("bill")
///     .filter("name", filters::trim())
///     .validate("name", validators::required())
///     .validate("amount", validators::positive());
///
/// let clean = config.validate_and_filter(json!({"name": " Rent ", "amount": 1200}))?;
/// ```
pub struct EntityValidationConfig {
    pub entity_type: String,
    filters: IndexMap<String, Vec<FieldFilter>>,
    validators: IndexMap<String, Vec<FieldValidator>>,
}

impl EntityValidationConfig {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            filters: IndexMap::new(),
            validators: IndexMap::new(),
        }
    }

    /// Register a filter for a field
    pub fn filter<F>(mut self, field: &str, filter: F) -> Self
    where
        F: Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.filters
            .entry(field.to_string())
            .or_default()
            .push(Box::new(filter));
        self
    }

    /// Register a validator for a field
    pub fn validate<V>(mut self, field: &str, validator: V) -> Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators
            .entry(field.to_string())
            .or_default()
            .push(Box::new(validator));
        self
    }

    /// Apply filters, then validators, to a JSON object payload
    ///
    /// Returns the filtered payload, or every field error found.
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, Vec<FieldError>> {
        let Value::Object(mut object) = payload else {
            return Err(vec![FieldError::new("_", "expected an object")]);
        };

        let mut errors = Vec::new();

        for (field, filters) in &self.filters {
            let Some(value) = object.remove(field) else {
                continue;
            };
            let mut current = value;
            for filter in filters {
                match filter(field, current.clone()) {
                    Ok(next) => current = next,
                    Err(e) => errors.push(FieldError::new(field, e.to_string())),
                }
            }
            object.insert(field.clone(), current);
        }

        for (field, validators) in &self.validators {
            let value = object.get(field).unwrap_or(&Value::Null);
            for validator in validators {
                if let Err(message) = validator(field, value) {
                    errors.push(FieldError::new(field, message));
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(object))
        } else {
            Err(errors)
        }
    }
}

/// Records that can be validated client-side before submission
pub trait Validate: Serialize + DeserializeOwned + Sized {
    /// Build the validation configuration for this record type
    fn validation_config() -> EntityValidationConfig;

    /// Normalize and validate the record
    ///
    /// Returns the normalized record (trimmed strings, rounded amounts, ...)
    /// or the field errors that block submission.
    fn validated(self) -> Result<Self, ValidationError> {
        let payload = serde_json::to_value(&self)
            .map_err(|e| ValidationError::Serialization(e.to_string()))?;

        let filtered = Self::validation_config()
            .validate_and_filter(payload)
            .map_err(ValidationError::FieldErrors)?;

        serde_json::from_value(filtered).map_err(|e| ValidationError::Serialization(e.to_string()))
    }
}
