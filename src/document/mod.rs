//! Form Document Model
//!
//! The typed document shared between the editor and the renderer.

pub mod convert;
pub mod schema;

pub use convert::{document_from_value, is_truthy};
pub use schema::{
    FieldKind, FieldOption, FieldSpec, FieldValidation, FormDocument, DEFAULT_DESCRIPTION,
    DEFAULT_TITLE,
};
