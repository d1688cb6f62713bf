//! Validation Engine
//!
//! Field rules applied at submit time.

pub mod engine;
pub mod patterns;

pub use engine::{
    validate_field, validate_form, Diagnostic, FieldValidationError, Rule, Severity,
    ValidationResult,
};
pub use patterns::PatternCache;
