//! Validation Engine
//!
//! Required and pattern checks for submitted field values, kept apart from
//! rendering and form state.

use std::collections::HashMap;

use thiserror::Error;

use super::patterns::PatternCache;
use crate::document::{FieldKind, FieldSpec, FormDocument};

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Which rule produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Required field left empty
    Required,
    /// Email value not matching `validation.pattern`
    Pattern,
    /// `validation.pattern` is not a valid regex
    InvalidPattern,
}

/// A diagnostic for one field slot
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub field_id: String,
    pub rule: Rule,
    pub message: String,
    pub severity: Severity,
}

/// A submitted value violating a field rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldValidationError {
    pub field_id: String,
    pub rule: Rule,
    pub message: String,
}

/// Result of validating a field or a whole form
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field_id: &str, rule: Rule, message: String) {
        self.diagnostics.push(Diagnostic {
            field_id: field_id.to_string(),
            rule,
            message,
            severity: Severity::Error,
        });
    }

    pub fn add_warning(&mut self, field_id: &str, rule: Rule, message: String) {
        self.diagnostics.push(Diagnostic {
            field_id: field_id.to_string(),
            rule,
            message,
            severity: Severity::Warning,
        });
    }

    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Error diagnostics as field validation errors, in order
    pub fn errors(&self) -> Vec<FieldValidationError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| FieldValidationError {
                field_id: d.field_id.clone(),
                rule: d.rule,
                message: d.message.clone(),
            })
            .collect()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

/// Validate one field's value. `None` means the slot was never set.
pub fn validate_field(
    field: &FieldSpec,
    value: Option<&str>,
    patterns: &mut PatternCache,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let value = value.unwrap_or("");

    match field.kind {
        FieldKind::Text | FieldKind::TextArea | FieldKind::Select | FieldKind::Radio => {
            check_required(field, value, &mut result);
        }
        FieldKind::Email => {
            if check_required(field, value, &mut result) {
                check_pattern(field, value, patterns, &mut result);
            }
        }
        FieldKind::Unknown(_) => {
            // Unknown kinds hold no value, so there is nothing to check
        }
    }

    result
}

/// Validate every registered slot of a document, in field order
pub fn validate_form(
    document: &FormDocument,
    values: &HashMap<String, String>,
    patterns: &mut PatternCache,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    for field in document.registered_fields() {
        let value = values.get(&field.id).map(String::as_str);
        let field_result = validate_field(field, value, patterns);
        result.diagnostics.extend(field_result.diagnostics);
    }

    result
}

/// Fallback message for a failed rule
pub fn required_message(field: &FieldSpec) -> String {
    format!("{} is required", field.label)
}

/// Returns false when the required check failed
fn check_required(field: &FieldSpec, value: &str, result: &mut ValidationResult) -> bool {
    if field.required && value.is_empty() {
        result.add_error(&field.id, Rule::Required, required_message(field));
        return false;
    }
    true
}

fn check_pattern(
    field: &FieldSpec,
    value: &str,
    patterns: &mut PatternCache,
    result: &mut ValidationResult,
) {
    // Empty values are only subject to the required rule
    if value.is_empty() {
        return;
    }
    let Some(source) = field.pattern() else {
        return;
    };

    match patterns.get(source) {
        Ok(regex) => {
            if !regex.is_match(value) {
                // Without a field message the generic fallback is shown, even
                // though the value is present.
                let message = field
                    .pattern_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| required_message(field));
                result.add_error(&field.id, Rule::Pattern, message);
            }
        }
        Err(e) => {
            result.add_warning(
                &field.id,
                Rule::InvalidPattern,
                format!("Pattern for '{}' is not a valid regex: {}", field.label, e),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldValidation;

    fn email_field(pattern: Option<&str>, message: Option<&str>) -> FieldSpec {
        FieldSpec {
            id: "email".to_string(),
            label: "Email".to_string(),
            kind: FieldKind::Email,
            required: true,
            placeholder: None,
            options: None,
            validation: Some(FieldValidation {
                pattern: pattern.map(str::to_string),
                message: message.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        result.add_warning("a", Rule::InvalidPattern, "Test warning".to_string());
        assert!(result.is_valid()); // Warnings don't make it invalid

        result.add_error("b", Rule::Required, "Test error".to_string());
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.warnings().count(), 1);
    }

    #[test]
    fn test_required_rejects_only_exact_empty() {
        let mut patterns = PatternCache::new();
        let field = email_field(None, None);

        let result = validate_field(&field, None, &mut patterns);
        assert_eq!(result.errors()[0].message, "Email is required");
        assert!(!validate_field(&field, Some(""), &mut patterns).is_valid());
        assert!(validate_field(&field, Some("  "), &mut patterns).is_valid());
    }

    #[test]
    fn test_pattern_match() {
        let mut patterns = PatternCache::new();
        let field = email_field(Some("^[^@]+@[^@]+$"), None);

        let result = validate_field(&field, Some("not-an-email"), &mut patterns);
        let errors = result.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, Rule::Pattern);
        assert_eq!(errors[0].message, "Email is required");

        assert!(validate_field(&field, Some("a@b"), &mut patterns).is_valid());
    }

    #[test]
    fn test_pattern_is_unanchored_search() {
        let mut patterns = PatternCache::new();
        let field = email_field(Some("@"), None);
        assert!(validate_field(&field, Some("x@y"), &mut patterns).is_valid());
    }

    #[test]
    fn test_pattern_message_overrides_fallback() {
        let mut patterns = PatternCache::new();
        let field = email_field(Some("^[^@]+@[^@]+$"), Some("Enter a valid email"));
        let result = validate_field(&field, Some("nope"), &mut patterns);
        assert_eq!(result.errors()[0].message, "Enter a valid email");
    }

    #[test]
    fn test_optional_empty_email_skips_pattern() {
        let mut patterns = PatternCache::new();
        let mut field = email_field(Some("^[^@]+@[^@]+$"), None);
        field.required = false;
        assert!(validate_field(&field, None, &mut patterns).is_valid());
    }

    #[test]
    fn test_invalid_pattern_warns_without_blocking() {
        let mut patterns = PatternCache::new();
        let field = email_field(Some("(unclosed"), None);
        let result = validate_field(&field, Some("anything"), &mut patterns);
        assert!(result.is_valid());
        assert_eq!(result.warnings().next().unwrap().rule, Rule::InvalidPattern);
    }

    #[test]
    fn test_pattern_ignored_for_text_fields() {
        let mut patterns = PatternCache::new();
        let mut field = email_field(Some("^[0-9]+$"), None);
        field.kind = FieldKind::Text;
        assert!(validate_field(&field, Some("letters"), &mut patterns).is_valid());
    }
}
