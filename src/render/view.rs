//! View model for the form pane.
//!
//! Building the view is pure: the same document and form state always give
//! the same view, independent of how it is written out.

use crate::document::{FieldKind, FieldSpec, FormDocument};
use crate::form::FormState;

pub const LOADING_MESSAGE: &str = "Loading form...";
pub const NO_FIELDS_MESSAGE: &str = "No fields available to render.";
pub const SELECT_PROMPT: &str = "Select an option";
pub const SUBMIT_LABEL: &str = "Submit";

/// What the form pane shows
#[derive(Debug, Clone, PartialEq)]
pub enum FormView {
    /// No document yet
    Placeholder { message: &'static str },
    Form(FormBody),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormBody {
    pub title: String,
    pub description: String,
    pub blocks: Vec<FieldBlock>,
    /// Shown instead of blocks when the document has no fields
    pub empty_message: Option<&'static str>,
    pub submit_label: &'static str,
}

/// Label, control and inline error for one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBlock {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub control: Control,
    pub error: Option<String>,
    pub focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Input {
        input_type: InputType,
        placeholder: Option<String>,
        value: String,
    },
    TextArea {
        placeholder: Option<String>,
        value: String,
    },
    /// Choices start with the blank prompt
    Select { choices: Vec<Choice> },
    /// Radios share the field id as group name
    RadioGroup { choices: Vec<Choice> },
    /// Unrecognized field type: label only
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Element id of one radio control
pub fn radio_id(field_id: &str, value: &str) -> String {
    format!("{}-{}", field_id, value)
}

/// Build the view for the current document and form state
pub fn build_view(document: Option<&FormDocument>, state: &FormState) -> FormView {
    let Some(document) = document else {
        return FormView::Placeholder {
            message: LOADING_MESSAGE,
        };
    };

    let blocks: Vec<FieldBlock> = document
        .fields
        .iter()
        .map(|field| build_block(field, state))
        .collect();

    FormView::Form(FormBody {
        title: document.title().to_string(),
        description: document.description().to_string(),
        empty_message: blocks.is_empty().then_some(NO_FIELDS_MESSAGE),
        blocks,
        submit_label: SUBMIT_LABEL,
    })
}

fn build_block(field: &FieldSpec, state: &FormState) -> FieldBlock {
    let value = state.value(&field.id);

    let control = match &field.kind {
        FieldKind::Text => Control::Input {
            input_type: InputType::Text,
            placeholder: field.placeholder.clone(),
            value: value.unwrap_or_default().to_string(),
        },
        FieldKind::Email => Control::Input {
            input_type: InputType::Email,
            placeholder: field.placeholder.clone(),
            value: value.unwrap_or_default().to_string(),
        },
        FieldKind::TextArea => Control::TextArea {
            placeholder: field.placeholder.clone(),
            value: value.unwrap_or_default().to_string(),
        },
        FieldKind::Select => {
            let selected = value.unwrap_or_default();
            let mut choices = vec![Choice {
                value: String::new(),
                label: SELECT_PROMPT.to_string(),
                selected: selected.is_empty(),
            }];
            choices.extend(field.options().iter().map(|option| Choice {
                value: option.value.clone(),
                label: option.label.clone(),
                selected: !selected.is_empty() && option.value == selected,
            }));
            Control::Select { choices }
        }
        FieldKind::Radio => Control::RadioGroup {
            choices: field
                .options()
                .iter()
                .map(|option| Choice {
                    value: option.value.clone(),
                    label: option.label.clone(),
                    selected: value == Some(option.value.as_str()),
                })
                .collect(),
        },
        FieldKind::Unknown(_) => Control::None,
    };

    FieldBlock {
        id: field.id.clone(),
        label: field.label.clone(),
        required: field.required,
        control,
        error: state.error(&field.id).map(|e| e.message.clone()),
        focused: state.focused() == Some(field.id.as_str()),
    }
}
