//! Per-payload validation configuration

use crate::core::error::FieldValidationError;
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

type FieldValidator = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type FieldFilter = Arc<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;
type RecordValidator = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Validators and filters for one payload type
///
/// Filters run first, field by field in registration order. Field validators
/// then run on the filtered values. Record validators run last, and only when
/// every field passed.
#[derive(Clone)]
pub struct EntityValidationConfig {
    entity_type: String,
    filters: Vec<(String, FieldFilter)>,
    validators: Vec<(String, FieldValidator)>,
    record_validators: Vec<(String, RecordValidator)>,
    nested: Vec<(String, EntityValidationConfig)>,
    item: Option<Box<EntityValidationConfig>>,
}

impl EntityValidationConfig {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            filters: Vec::new(),
            validators: Vec::new(),
            record_validators: Vec::new(),
            nested: Vec::new(),
            item: None,
        }
    }

    /// A config for a JSON array whose every element follows `item`
    pub fn list_of(item: EntityValidationConfig) -> Self {
        let entity_type = format!("[{}]", item.entity_type);
        Self {
            item: Some(Box::new(item)),
            ..Self::new(entity_type)
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn add_validator<F>(&mut self, field: &str, validator: F) -> &mut Self
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators.push((field.to_string(), Arc::new(validator)));
        self
    }

    pub fn add_filter<F>(&mut self, field: &str, filter: F) -> &mut Self
    where
        F: Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.filters.push((field.to_string(), Arc::new(filter)));
        self
    }

    /// Add a whole-record rule; failures are reported against `field`
    pub fn add_record_validator<F>(&mut self, field: &str, validator: F) -> &mut Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.record_validators
            .push((field.to_string(), Arc::new(validator)));
        self
    }

    /// Validate an optional array field element by element with `config`
    pub fn add_nested_list(&mut self, field: &str, config: EntityValidationConfig) -> &mut Self {
        self.nested.push((field.to_string(), config));
        self
    }

    /// Filter then validate `payload`
    ///
    /// Returns the filtered payload, or every failure found. Field names in
    /// failures of nested values are paths such as `courses[1].title`.
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, Vec<FieldValidationError>> {
        let mut errors = Vec::new();
        let value = self.run(payload, "", &mut errors);
        if errors.is_empty() {
            Ok(value)
        } else {
            Err(errors)
        }
    }

    fn run(&self, payload: Value, path: &str, errors: &mut Vec<FieldValidationError>) -> Value {
        if let Some(item) = &self.item {
            let Value::Array(elements) = payload else {
                errors.push(field_error(path, "$", "Expected a JSON array."));
                return payload;
            };
            return Value::Array(
                elements
                    .into_iter()
                    .enumerate()
                    .map(|(index, element)| item.run(element, &format!("{path}[{index}]"), errors))
                    .collect(),
            );
        }

        let Value::Object(mut object) = payload else {
            errors.push(field_error(path, "$", "Expected a JSON object."));
            return payload;
        };

        for (field, filter) in &self.filters {
            if let Some(value) = object.remove(field) {
                match filter(field, value.clone()) {
                    Ok(filtered) => object.insert(field.clone(), filtered),
                    Err(e) => {
                        errors.push(field_error(path, field, &e.to_string()));
                        object.insert(field.clone(), value)
                    }
                };
            }
        }

        let before = errors.len();
        for (field, validator) in &self.validators {
            let value = object.get(field).unwrap_or(&Value::Null);
            if let Err(message) = validator(field, value) {
                errors.push(field_error(path, field, &message));
            }
        }

        for (field, config) in &self.nested {
            if let Some(value) = object.remove(field) {
                let nested_path = join_path(path, field);
                let filtered = match value {
                    Value::Array(elements) => Value::Array(
                        elements
                            .into_iter()
                            .enumerate()
                            .map(|(index, element)| {
                                config.run(element, &format!("{nested_path}[{index}]"), errors)
                            })
                            .collect(),
                    ),
                    Value::Null => Value::Null,
                    other => {
                        errors.push(field_error(path, field, "Expected a JSON array."));
                        other
                    }
                };
                object.insert(field.clone(), filtered);
            }
        }

        let record = Value::Object(object);
        if errors.len() == before {
            for (field, validator) in &self.record_validators {
                if let Err(message) = validator(&record) {
                    errors.push(field_error(path, field, &message));
                }
            }
        }

        record
    }
}

impl std::fmt::Debug for EntityValidationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityValidationConfig")
            .field("entity_type", &self.entity_type)
            .field("filters", &self.filters.len())
            .field("validators", &self.validators.len())
            .field("record_validators", &self.record_validators.len())
            .finish()
    }
}

fn join_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn field_error(path: &str, field: &str, message: &str) -> FieldValidationError {
    let field = if field == "$" && !path.is_empty() {
        path.to_string()
    } else {
        join_path(path, field)
    };
    FieldValidationError {
        field,
        message: message.to_string(),
    }
}
