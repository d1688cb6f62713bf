//! Editor and form wired together.
//!
//! The workbench is the single writer of the shared document. Editor changes
//! flow to the renderer; only [`Workbench::reset`] flows back into the editor.

use crate::document::FormDocument;
use crate::editor::{EditOutcome, Editor, Key};
use crate::form::{FormError, FormState, Submission, ValidationFailed};
use crate::render::{self, FormView, RenderOptions};
use crate::theme::Theme;

#[derive(Debug, Default)]
pub struct Workbench {
    editor: Editor,
    document: Option<FormDocument>,
    form: FormState,
    theme: Theme,
}

impl Workbench {
    pub fn new(document: Option<FormDocument>, theme: Theme) -> Self {
        Self {
            editor: Editor::new(document.as_ref()),
            document,
            form: FormState::new(),
            theme,
        }
    }

    /// Start from raw editor text, as if the user had typed it
    pub fn from_text(text: &str, theme: Theme) -> Self {
        let mut workbench = Self::new(None, theme);
        workbench.type_text(text);
        workbench
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn document(&self) -> Option<&FormDocument> {
        self.document.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }

    /// Replace the editor buffer with `text`
    pub fn type_text(&mut self, text: &str) -> bool {
        let outcome = self.editor.set_text(text);
        self.apply(outcome)
    }

    pub fn handle_key(&mut self, key: Key) -> bool {
        let outcome = self.editor.handle_key(key);
        self.apply(outcome)
    }

    pub fn tick(&mut self) -> bool {
        self.editor.tick()
    }

    /// Replace the document from outside the editor, discarding unsaved edits
    pub fn reset(&mut self, document: Option<FormDocument>) {
        self.editor.sync(document.as_ref());
        self.document = document;
        self.form.reset();
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), FormError> {
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        self.form.set_value(document, id, value)
    }

    pub fn clear_value(&mut self, id: &str) {
        if let Some(document) = &self.document {
            self.form.clear_value(document, id);
        }
    }

    /// Submit the current form. Without a document there is nothing to submit.
    pub fn submit(&mut self) -> Option<Result<Submission, ValidationFailed>> {
        let document = self.document.as_ref()?;
        Some(self.form.submit(document))
    }

    pub fn view(&self) -> FormView {
        render::build_view(self.document.as_ref(), &self.form)
    }

    /// Form pane only
    pub fn render_html(&self, options: &RenderOptions) -> String {
        render::render_html(&self.view(), self.theme, options)
    }

    /// Editor and form side by side
    pub fn render_page(&self, options: &RenderOptions) -> String {
        render::render_page(
            &self.view(),
            self.editor.text(),
            self.editor.banner(),
            self.theme,
            options,
        )
    }

    /// Returns whether the shared document was replaced
    fn apply(&mut self, outcome: EditOutcome) -> bool {
        match outcome.into_update() {
            Some(document) => {
                if let Some(document) = &document {
                    self.form.retain_valid_choices(document);
                }
                self.document = document;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_edit_keeps_last_document() {
        let mut workbench = Workbench::from_text(r#"{"formTitle": "Kept"}"#, Theme::Light);
        let before = workbench.render_html(&RenderOptions::default());

        assert!(!workbench.type_text("{bad"));
        assert_eq!(workbench.editor().banner(), Some("Invalid JSON format."));
        assert_eq!(workbench.document().unwrap().title(), "Kept");
        assert_eq!(workbench.render_html(&RenderOptions::default()), before);
    }

    #[test]
    fn test_clearing_buffer_shows_placeholder() {
        let mut workbench = Workbench::from_text("{}", Theme::Light);
        assert!(workbench.type_text(""));
        assert!(workbench.document().is_none());
        assert_eq!(workbench.editor().banner(), None);
        assert!(matches!(workbench.view(), FormView::Placeholder { .. }));
        assert!(workbench.submit().is_none());
    }

    #[test]
    fn test_reset_overwrites_buffer() {
        let mut workbench = Workbench::from_text("{bad", Theme::Light);
        workbench.reset(Some(FormDocument::default()));
        assert_eq!(workbench.editor().text(), "{\n  \"fields\": []\n}");
        assert_eq!(workbench.editor().banner(), None);
        assert!(workbench.document().is_some());
    }

    #[test]
    fn test_theme_toggle() {
        let mut workbench = Workbench::default();
        assert_eq!(workbench.theme(), Theme::Light);
        assert_eq!(workbench.toggle_theme(), Theme::Dark);
        assert!(workbench.render_html(&RenderOptions::default()).contains("background-color: black"));
    }

    #[test]
    fn test_edit_drops_choice_missing_from_new_options() {
        let select = |option: &str| {
            format!(
                r#"{{"fields": [{{"id": "x", "label": "X", "type": "select", "required": true,
                    "options": [{{"value": "{option}", "label": "{option}"}}]}}]}}"#
            )
        };
        let mut workbench = Workbench::from_text(&select("1"), Theme::Light);
        workbench.set_value("x", "1").unwrap();

        assert!(workbench.type_text(&select("2")));
        assert_eq!(workbench.form().value("x"), None);
        assert!(workbench
            .render_html(&RenderOptions::default())
            .contains("<option value=\"\" selected>Select an option</option>"));
        assert!(workbench.submit().unwrap().is_err());
    }

    #[test]
    fn test_set_value_without_document() {
        let mut workbench = Workbench::default();
        assert_eq!(
            workbench.set_value("x", "1"),
            Err(FormError::UnknownField("x".to_string()))
        );
    }
}
