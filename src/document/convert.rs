//! Lenient conversion from parsed JSON to a form document.
//!
//! Any syntactically valid JSON produces a result: wrongly typed members fall
//! back to defaults instead of failing the whole document.

use serde_json::{Map, Value};

use super::schema::{FieldKind, FieldOption, FieldSpec, FieldValidation, FormDocument};

/// Convert a parsed JSON value into a form document.
///
/// Falsy values (`null`, `false`, `0`, `""`) mean "no document". Any other
/// value yields a document, possibly with every member defaulted.
pub fn document_from_value(value: &Value) -> Option<FormDocument> {
    if !is_truthy(value) {
        return None;
    }

    let Value::Object(map) = value else {
        return Some(FormDocument::default());
    };

    let fields = match map.get("fields") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_object)
            .map(field_from_map)
            .collect(),
        _ => Vec::new(),
    };

    Some(FormDocument {
        form_title: map.get("formTitle").and_then(text_of),
        form_description: map.get("formDescription").and_then(text_of),
        fields,
    })
}

fn field_from_map(map: &Map<String, Value>) -> FieldSpec {
    let kind = match map.get("type") {
        Some(Value::String(name)) => FieldKind::from(name.as_str()),
        _ => FieldKind::Unknown(String::new()),
    };

    let options = match map.get("options") {
        Some(Value::Array(entries)) => Some(
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(|option| FieldOption {
                    value: option.get("value").and_then(text_of).unwrap_or_default(),
                    label: option.get("label").and_then(text_of).unwrap_or_default(),
                })
                .collect(),
        ),
        _ => None,
    };

    let validation = map
        .get("validation")
        .and_then(Value::as_object)
        .map(|rules| FieldValidation {
            pattern: rules
                .get("pattern")
                .and_then(Value::as_str)
                .map(str::to_string),
            message: rules
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        });

    FieldSpec {
        id: map.get("id").and_then(text_of).unwrap_or_default(),
        label: map.get("label").and_then(text_of).unwrap_or_default(),
        kind,
        required: map.get("required").is_some_and(is_truthy),
        placeholder: map.get("placeholder").and_then(text_of),
        options,
        validation,
    }
}

/// Strings and numbers render as text; everything else is ignored
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// JavaScript-style truthiness, which is how documents flag optional state
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
