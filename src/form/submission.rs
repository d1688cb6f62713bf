//! Submission results.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::document::{FieldKind, FormDocument};
use crate::validation::FieldValidationError;

/// Confirmation shown after a successful submit
pub const CONFIRMATION: &str = "Form submitted successfully!";

/// Values collected by a successful submit, keyed by field id
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    values: Map<String, Value>,
}

impl Submission {
    /// Collect one entry per registered slot in field order.
    ///
    /// Unset text-like slots submit an empty string; an unselected radio
    /// group submits `null`.
    pub(crate) fn collect(document: &FormDocument, values: &HashMap<String, String>) -> Self {
        let mut collected = Map::new();
        for field in document.registered_fields() {
            let value = match (values.get(&field.id), &field.kind) {
                (Some(value), _) => Value::String(value.clone()),
                (None, FieldKind::Radio) => Value::Null,
                (None, _) => Value::String(String::new()),
            };
            collected.insert(field.id.clone(), value);
        }
        Self { values: collected }
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn confirmation(&self) -> &'static str {
        CONFIRMATION
    }
}

/// Submit blocked by at least one invalid field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Form has invalid fields: {}", join_messages(.errors))]
pub struct ValidationFailed {
    pub errors: Vec<FieldValidationError>,
}

fn join_messages(errors: &[FieldValidationError]) -> String {
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::document_from_value;
    use crate::validation::Rule;
    use serde_json::json;

    #[test]
    fn test_collect_defaults() {
        let doc = document_from_value(&json!({
            "fields": [
                {"id": "name", "label": "Name", "type": "text"},
                {"id": "size", "label": "Size", "type": "radio", "options": [{"value": "s", "label": "S"}]},
                {"id": "note", "label": "Note", "type": "textarea"},
                {"id": "when", "label": "When", "type": "date"}
            ]
        }))
        .unwrap();

        let mut values = HashMap::new();
        values.insert("note".to_string(), "hello".to_string());
        values.insert("stale".to_string(), "gone".to_string());

        let submission = Submission::collect(&doc, &values);
        assert_eq!(
            submission.to_json(),
            json!({"name": "", "size": null, "note": "hello"})
        );
        assert_eq!(submission.confirmation(), "Form submitted successfully!");
    }

    #[test]
    fn test_validation_failed_display() {
        let failed = ValidationFailed {
            errors: vec![FieldValidationError {
                field_id: "a".to_string(),
                rule: Rule::Required,
                message: "A is required".to_string(),
            }],
        };
        assert_eq!(failed.to_string(), "Form has invalid fields: A is required");
    }
}
