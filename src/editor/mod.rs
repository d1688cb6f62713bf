//! JSON Editor
//!
//! Holds the raw text buffer and parses it on every change. The buffer always
//! keeps exactly what was typed; a failed parse only raises the error banner
//! and the caller keeps its last good document.

pub mod keys;

use thiserror::Error;

use crate::document::{document_from_value, FormDocument};
pub use keys::Key;

/// Banner text shown while the buffer does not parse
pub const INVALID_JSON_BANNER: &str = "Invalid JSON format.";

/// Buffer shown when there is no document
const EMPTY_DOCUMENT: &str = "{}";

/// The editor buffer is not valid JSON
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid JSON format.")]
pub struct DocumentParseError {
    pub line: usize,
    pub column: usize,
    /// Parser message, for logs
    pub detail: String,
}

impl From<serde_json::Error> for DocumentParseError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            line: e.line(),
            column: e.column(),
            detail: e.to_string(),
        }
    }
}

/// What a buffer change means for the shared document
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Buffer is blank: there is no document
    Cleared,
    /// Buffer parsed; `None` when the JSON is a falsy value
    Parsed(Option<FormDocument>),
    /// Buffer does not parse; keep the previous document
    Rejected,
    /// The key did not change the buffer
    Unchanged,
}

impl EditOutcome {
    /// The replacement document, if the change produces one
    pub fn into_update(self) -> Option<Option<FormDocument>> {
        match self {
            EditOutcome::Cleared => Some(None),
            EditOutcome::Parsed(document) => Some(document),
            EditOutcome::Rejected | EditOutcome::Unchanged => None,
        }
    }
}

/// Text buffer with live parsing
#[derive(Debug, Clone)]
pub struct Editor {
    text: String,
    cursor: usize,
    pending_cursor: Option<usize>,
    error: Option<DocumentParseError>,
}

impl Editor {
    /// Start from the pretty form of `document`, or `{}` without one
    pub fn new(document: Option<&FormDocument>) -> Self {
        let text = serialize(document);
        Self {
            cursor: text.len(),
            text,
            pending_cursor: None,
            error: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor as a byte offset into the buffer
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.flush_pending();
        self.cursor = keys::clamp_cursor(&self.text, cursor);
    }

    pub fn error(&self) -> Option<&DocumentParseError> {
        self.error.as_ref()
    }

    /// Banner to display, if the last parse failed
    pub fn banner(&self) -> Option<&'static str> {
        self.error.as_ref().map(|_| INVALID_JSON_BANNER)
    }

    /// Replace the whole buffer with what the user typed
    pub fn set_text(&mut self, text: impl Into<String>) -> EditOutcome {
        self.flush_pending();
        self.text = text.into();
        self.cursor = keys::clamp_cursor(&self.text, self.cursor);
        self.on_change()
    }

    /// Insert text at the cursor and move the cursor past it
    pub fn insert(&mut self, text: &str) -> EditOutcome {
        self.flush_pending();
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.on_change()
    }

    /// Apply one key press.
    ///
    /// Enter and Space insert at the cursor and schedule the cursor move for
    /// the next [`Editor::tick`].
    pub fn handle_key(&mut self, key: Key) -> EditOutcome {
        self.flush_pending();

        if let Some(ch) = key.inserted_char() {
            self.text.insert(self.cursor, ch);
            let advanced = self.cursor + ch.len_utf8();
            if key.defers_cursor() {
                self.pending_cursor = Some(advanced);
            } else {
                self.cursor = advanced;
            }
            return self.on_change();
        }

        match key {
            Key::Backspace => {
                if self.cursor == 0 {
                    return EditOutcome::Unchanged;
                }
                let start = keys::prev_boundary(&self.text, self.cursor);
                self.text.replace_range(start..self.cursor, "");
                self.cursor = start;
                self.on_change()
            }
            Key::Left => {
                self.cursor = keys::prev_boundary(&self.text, self.cursor);
                EditOutcome::Unchanged
            }
            Key::Right => {
                self.cursor = keys::next_boundary(&self.text, self.cursor);
                EditOutcome::Unchanged
            }
            Key::Home => {
                self.cursor = 0;
                EditOutcome::Unchanged
            }
            Key::End => {
                self.cursor = self.text.len();
                EditOutcome::Unchanged
            }
            Key::Enter | Key::Space | Key::Char(_) => EditOutcome::Unchanged,
        }
    }

    /// Run the deferred cursor move, if one is scheduled.
    ///
    /// Returns whether anything fired.
    pub fn tick(&mut self) -> bool {
        match self.pending_cursor.take() {
            Some(cursor) => {
                self.cursor = keys::clamp_cursor(&self.text, cursor);
                true
            }
            None => false,
        }
    }

    /// Overwrite the buffer after the document changed elsewhere.
    ///
    /// Unsaved edits are discarded.
    pub fn sync(&mut self, document: Option<&FormDocument>) {
        self.text = serialize(document);
        self.cursor = self.text.len();
        self.pending_cursor = None;
        self.error = None;
    }

    fn flush_pending(&mut self) {
        self.tick();
    }

    fn on_change(&mut self) -> EditOutcome {
        if self.text.trim().is_empty() {
            self.error = None;
            log::debug!("Editor buffer cleared");
            return EditOutcome::Cleared;
        }

        match serde_json::from_str::<serde_json::Value>(&self.text) {
            Ok(value) => {
                self.error = None;
                EditOutcome::Parsed(document_from_value(&value))
            }
            Err(e) => {
                let error = DocumentParseError::from(e);
                log::debug!("Editor buffer does not parse: {}", error.detail);
                self.error = Some(error);
                EditOutcome::Rejected
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(None)
    }
}

fn serialize(document: Option<&FormDocument>) -> String {
    document
        .map(FormDocument::to_pretty_json)
        .unwrap_or_else(|| EMPTY_DOCUMENT.to_string())
}
