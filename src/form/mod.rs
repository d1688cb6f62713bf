//! Form State
//!
//! Value slots, per-field errors and the submit flow for a rendered form.
//! Slots are keyed by field id; fields sharing an id share a slot.

pub mod submission;

use std::collections::HashMap;

use thiserror::Error;

use crate::document::{FieldKind, FieldSpec, FormDocument};
use crate::validation::{self, FieldValidationError, PatternCache};

pub use submission::{Submission, ValidationFailed, CONFIRMATION};

/// Misuse of the form state API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("No field with id '{0}' takes a value")]
    UnknownField(String),

    #[error("'{value}' is not an option of field '{field}'")]
    UnknownOption { field: String, value: String },
}

/// Values and errors of the rendered form
#[derive(Debug, Default)]
pub struct FormState {
    values: HashMap<String, String>,
    errors: HashMap<String, FieldValidationError>,
    focused: Option<String>,
    submit_attempted: bool,
    patterns: PatternCache,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a field slot.
    ///
    /// Choice fields only accept one of their option values; selects also
    /// accept the blank choice. After a failed submit the slot is
    /// re-validated so errors clear as the user fixes them.
    pub fn set_value(
        &mut self,
        document: &FormDocument,
        id: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let value = value.into();
        let field = document
            .field(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;

        if !accepts_choice(field, &value) {
            return Err(FormError::UnknownOption {
                field: id.to_string(),
                value,
            });
        }

        log::debug!("Field '{}' set to {:?}", id, value);
        self.values.insert(id.to_string(), value);
        if self.submit_attempted {
            self.revalidate(document, id);
        }
        Ok(())
    }

    /// Unset a slot, e.g. deselect a radio group
    pub fn clear_value(&mut self, document: &FormDocument, id: &str) {
        self.values.remove(id);
        if self.submit_attempted {
            self.revalidate(document, id);
        }
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn error(&self, id: &str) -> Option<&FieldValidationError> {
        self.errors.get(id)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Field focused after the last failed submit
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Validate all slots and collect the values.
    ///
    /// On failure the errors are kept for display and focus moves to the
    /// first invalid field in document order.
    pub fn submit(&mut self, document: &FormDocument) -> Result<Submission, ValidationFailed> {
        self.submit_attempted = true;
        let result = validation::validate_form(document, &self.values, &mut self.patterns);

        for warning in result.warnings() {
            log::warn!("{}", warning.message);
        }

        let errors = result.errors();
        self.errors = errors
            .iter()
            .map(|error| (error.field_id.clone(), error.clone()))
            .collect();

        if !errors.is_empty() {
            self.focused = errors.first().map(|error| error.field_id.clone());
            log::debug!("Submit blocked by {} invalid field(s)", errors.len());
            return Err(ValidationFailed { errors });
        }

        self.focused = None;
        let submission = Submission::collect(document, &self.values);
        log::info!("Form submitted: {}", submission.to_json());
        Ok(submission)
    }

    /// Drop choice values that are no longer options of their field.
    ///
    /// Called when an edit replaces the document, so a stale selection
    /// cannot satisfy a required check or reach a submission.
    pub fn retain_valid_choices(&mut self, document: &FormDocument) {
        let stale: Vec<String> = self
            .values
            .iter()
            .filter(|(id, value)| {
                document
                    .field(id)
                    .is_some_and(|field| !accepts_choice(field, value))
            })
            .map(|(id, _)| id.clone())
            .collect();

        for id in stale {
            log::debug!("Dropping stale choice for field '{}'", id);
            self.values.remove(&id);
            if self.submit_attempted {
                self.revalidate(document, &id);
            }
        }
    }

    /// Forget values, errors and submit history
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.focused = None;
        self.submit_attempted = false;
    }

    fn revalidate(&mut self, document: &FormDocument, id: &str) {
        let Some(field) = document.field(id) else {
            self.errors.remove(id);
            return;
        };

        let value = self.values.get(id).map(String::as_str);
        let result = validation::validate_field(field, value, &mut self.patterns);
        match result.errors().into_iter().next() {
            Some(error) => {
                self.errors.insert(id.to_string(), error);
            }
            None => {
                self.errors.remove(id);
            }
        }
    }
}

/// Choice fields take one of their option values; selects also take the blank choice
fn accepts_choice(field: &FieldSpec, value: &str) -> bool {
    match field.kind {
        FieldKind::Select if value.is_empty() => true,
        FieldKind::Select | FieldKind::Radio => field.find_option(value).is_some(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::document_from_value;
    use serde_json::json;

    fn select_document() -> FormDocument {
        document_from_value(&json!({
            "formTitle": "T",
            "fields": [{
                "id": "x",
                "label": "X",
                "type": "select",
                "required": true,
                "options": [{"value": "1", "label": "One"}]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_select_submit_flow() {
        let doc = select_document();
        let mut state = FormState::new();

        let failed = state.submit(&doc).unwrap_err();
        assert_eq!(failed.errors[0].message, "X is required");
        assert_eq!(state.focused(), Some("x"));

        state.set_value(&doc, "x", "1").unwrap();
        assert!(!state.has_errors(), "fixing the value clears the error");

        let submission = state.submit(&doc).unwrap();
        assert_eq!(submission.to_json(), json!({"x": "1"}));
        assert_eq!(state.focused(), None);
    }

    #[test]
    fn test_blank_select_choice_fails_required() {
        let doc = select_document();
        let mut state = FormState::new();
        state.set_value(&doc, "x", "").unwrap();
        assert!(state.submit(&doc).is_err());
    }

    #[test]
    fn test_rejects_unknown_option_and_field() {
        let doc = select_document();
        let mut state = FormState::new();

        assert_eq!(
            state.set_value(&doc, "x", "2"),
            Err(FormError::UnknownOption {
                field: "x".to_string(),
                value: "2".to_string()
            })
        );
        assert_eq!(
            state.set_value(&doc, "missing", "1"),
            Err(FormError::UnknownField("missing".to_string()))
        );
    }

    #[test]
    fn test_errors_stay_until_submit_attempted() {
        let doc = select_document();
        let mut state = FormState::new();
        state.set_value(&doc, "x", "").unwrap();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_clear_value_revalidates_after_submit() {
        let doc = select_document();
        let mut state = FormState::new();
        state.set_value(&doc, "x", "1").unwrap();
        state.submit(&doc).unwrap();

        state.clear_value(&doc, "x");
        assert_eq!(state.error("x").unwrap().message, "X is required");
    }

    #[test]
    fn test_duplicate_ids_share_a_slot() {
        let doc = document_from_value(&json!({
            "fields": [
                {"id": "dup", "label": "First", "type": "text"},
                {"id": "dup", "label": "Second", "type": "text", "required": true}
            ]
        }))
        .unwrap();
        let mut state = FormState::new();

        let failed = state.submit(&doc).unwrap_err();
        assert_eq!(failed.errors.len(), 1);
        assert_eq!(failed.errors[0].message, "Second is required");

        state.set_value(&doc, "dup", "shared").unwrap();
        assert_eq!(state.submit(&doc).unwrap().to_json(), json!({"dup": "shared"}));
    }

    #[test]
    fn test_stale_choice_dropped_when_options_change() {
        let doc = select_document();
        let mut state = FormState::new();
        state.set_value(&doc, "x", "1").unwrap();

        let edited = document_from_value(&json!({
            "fields": [{
                "id": "x",
                "label": "X",
                "type": "select",
                "required": true,
                "options": [{"value": "2", "label": "Two"}]
            }]
        }))
        .unwrap();
        state.retain_valid_choices(&edited);

        assert_eq!(state.value("x"), None);
        let failed = state.submit(&edited).unwrap_err();
        assert_eq!(failed.errors[0].message, "X is required");
    }

    #[test]
    fn test_choice_kept_when_still_an_option() {
        let doc = select_document();
        let mut state = FormState::new();
        state.set_value(&doc, "x", "1").unwrap();
        state.retain_valid_choices(&doc);
        assert_eq!(state.value("x"), Some("1"));
    }

    #[test]
    fn test_unknown_kind_sharing_an_id_keeps_required_check() {
        let doc = document_from_value(&json!({
            "fields": [
                {"id": "a", "label": "A", "type": "text", "required": true},
                {"id": "a", "label": "Later", "type": "date"}
            ]
        }))
        .unwrap();
        let mut state = FormState::new();

        let failed = state.submit(&doc).unwrap_err();
        assert_eq!(failed.errors[0].message, "A is required");

        state.set_value(&doc, "a", "hello").unwrap();
        assert_eq!(state.submit(&doc).unwrap().to_json(), json!({"a": "hello"}));
    }

    #[test]
    fn test_reset_forgets_everything() {
        let doc = select_document();
        let mut state = FormState::new();
        let _ = state.submit(&doc);
        state.reset();
        assert!(!state.has_errors());
        assert_eq!(state.value("x"), None);
        assert_eq!(state.focused(), None);
    }
}
