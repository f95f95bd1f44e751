//! Renders `validator` errors as `{ field: [message, ...] }`.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors};

/// Field-keyed, human-readable messages, sorted by field name.
pub fn field_messages(errors: &ValidationErrors) -> Value {
    let mut fields: BTreeMap<String, Vec<Value>> = BTreeMap::new();

    for (field, field_errors) in errors.field_errors() {
        let messages = fields.entry(field.to_string()).or_default();
        for error in field_errors.iter() {
            messages.push(Value::String(describe(&field, error)));
        }
    }

    Value::Object(fields.into_iter().map(|(k, v)| (k, Value::Array(v))).collect::<Map<_, _>>())
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let label = field.replace('_', " ");
    let param = |name: &str| error.params.get(name).map(display_param);

    match error.code.as_ref() {
        "required" => format!("The {} field is required.", label),
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => {
                format!("The {} field must be between {} and {} characters.", label, min, max)
            }
            (Some(min), None) => format!("The {} field must be at least {} characters.", label, min),
            (None, Some(max)) => {
                format!("The {} field must not be greater than {} characters.", label, max)
            }
            (None, None) => format!("The {} field has an invalid length.", label),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("The {} field must be between {} and {}.", label, min, max),
            (Some(min), None) => format!("The {} field must be at least {}.", label, min),
            (None, Some(max)) => format!("The {} field must not be greater than {}.", label, max),
            (None, None) => format!("The {} field is out of range.", label),
        },
        _ => format!("The {} field is invalid.", label),
    }
}

fn display_param(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
