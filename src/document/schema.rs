//! Form Document Types
//!
//! Typed view of the JSON a user types into the editor. Serialization uses
//! the camelCase keys of the document format.

use serde::{Deserialize, Serialize};

/// Title shown when the document has none
pub const DEFAULT_TITLE: &str = "Untitled Form";

/// Description shown when the document has none
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// Root form document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// One form field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

/// Choice for select and radio fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Extra validation rules for a field
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldValidation {
    /// Regex source, checked for email fields only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message shown when the pattern does not match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Field control kinds
///
/// Unrecognized type strings are kept in `Unknown` so they survive a
/// serialize/parse round trip. Such fields render their label only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Email,
    Select,
    Radio,
    TextArea,
    Unknown(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::TextArea => "textarea",
            FieldKind::Unknown(name) => name,
        }
    }

    /// Whether the kind picks its value from `options`
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Radio)
    }

    /// Whether fields of this kind hold a value at all
    pub fn is_registered(&self) -> bool {
        !matches!(self, FieldKind::Unknown(_))
    }
}

impl From<&str> for FieldKind {
    fn from(name: &str) -> Self {
        match name {
            "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "select" => FieldKind::Select,
            "radio" => FieldKind::Radio,
            "textarea" => FieldKind::TextArea,
            other => FieldKind::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(name: String) -> Self {
        FieldKind::from(name.as_str())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FormDocument {
    /// Title with the empty/absent fallback applied
    pub fn title(&self) -> &str {
        non_empty(self.form_title.as_deref()).unwrap_or(DEFAULT_TITLE)
    }

    /// Description with the empty/absent fallback applied
    pub fn description(&self) -> &str {
        non_empty(self.form_description.as_deref()).unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Find the field owning a value slot.
    ///
    /// Duplicate ids resolve to the last field that takes a value, matching
    /// the slot's last-write-wins registration. Unknown kinds never own a slot.
    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.id == id && field.kind.is_registered())
    }

    /// Fields that hold values, one per distinct id, in first-appearance order.
    ///
    /// Each entry is the last field declared with that id.
    pub fn registered_fields(&self) -> Vec<&FieldSpec> {
        let mut seen: Vec<&str> = Vec::new();
        let mut result = Vec::new();
        for field in &self.fields {
            if !field.kind.is_registered() || seen.contains(&field.id.as_str()) {
                continue;
            }
            seen.push(&field.id);
            if let Some(owner) = self.field(&field.id) {
                result.push(owner);
            }
        }
        result
    }

    /// Pretty JSON with a two-space indent, as shown in the editor
    pub fn to_pretty_json(&self) -> String {
        // A struct of strings, bools and vectors always serializes.
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl FieldSpec {
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Find an option by value
    pub fn find_option(&self, value: &str) -> Option<&FieldOption> {
        self.options().iter().find(|option| option.value == value)
    }

    /// Pattern source, only meaningful for email fields
    pub fn pattern(&self) -> Option<&str> {
        if self.kind != FieldKind::Email {
            return None;
        }
        self.validation.as_ref()?.pattern.as_deref()
    }

    /// Field-specific message for pattern failures
    pub fn pattern_message(&self) -> Option<&str> {
        non_empty(self.validation.as_ref()?.message.as_deref())
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
