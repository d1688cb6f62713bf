//! JSON Form Builder
//!
//! Live form rendering from a JSON form document.
//!
//! This library provides:
//! - The form document model and lenient JSON conversion
//! - An editor buffer that parses on every change
//! - Required/pattern validation and the submit flow
//! - A view model and HTML output, with a light/dark theme

pub mod cli;
pub mod config;
pub mod document;
pub mod editor;
pub mod form;
pub mod render;
pub mod theme;
pub mod validation;
pub mod workbench;

// Re-exports for clean public API
pub use config::Config;
pub use document::{FieldKind, FieldSpec, FormDocument};
pub use editor::{EditOutcome, Editor, Key};
pub use form::{FormState, Submission};
pub use render::{build_view, render_html, FormView, RenderOptions};
pub use theme::Theme;
pub use validation::{validate_form, FieldValidationError};
pub use workbench::Workbench;
