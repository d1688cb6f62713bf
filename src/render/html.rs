//! HTML output for the form view and the split-pane page.

use super::view::{radio_id, Choice, Control, FieldBlock, FormBody, FormView};
use crate::theme::{Palette, Theme};

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct HtmlWriter<'a> {
    options: &'a RenderOptions,
    depth: usize,
    buffer: String,
}

impl<'a> HtmlWriter<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn open(&mut self, text: &str) {
        self.add_line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.add_line(text);
    }

    fn into_output(self) -> String {
        self.buffer
    }
}

/// Write the form pane as an HTML fragment
pub fn render_html(view: &FormView, theme: Theme, options: &RenderOptions) -> String {
    let mut writer = HtmlWriter::new(options);
    write_form_pane(view, theme.palette(), &mut writer);
    writer.into_output()
}

/// Write the complete split-pane page: editor on the left, form on the right
pub fn render_page(
    view: &FormView,
    editor_text: &str,
    banner: Option<&str>,
    theme: Theme,
    options: &RenderOptions,
) -> String {
    let palette = theme.palette();
    let mut w = HtmlWriter::new(options);

    w.add_line("<!DOCTYPE html>");
    w.open("<html>");
    w.open("<head>");
    w.add_line("<meta charset=\"UTF-8\">");
    w.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    w.add_line("<title>JSON Form Builder</title>");
    w.close("</head>");
    w.open(&format!(
        "<body data-theme=\"{}\" style=\"margin: 0; background-color: {}; color: {};\">",
        theme, palette.background, palette.foreground
    ));
    w.open("<div style=\"display: flex; height: 100vh;\">");

    w.open(&format!(
        "<div class=\"editor-pane\" style=\"width: 50%; border-right: 1px solid {};\">",
        palette.border
    ));
    if let Some(banner) = banner {
        w.add_line(&format!(
            "<div class=\"editor-error\" role=\"alert\" style=\"color: {}; padding: 8px;\">{}</div>",
            palette.error,
            escape_html(banner)
        ));
    }
    // Buffer text stays on the tag line so indentation never leaks into it
    w.add_line(&format!(
        "<textarea spellcheck=\"false\" style=\"width: 100%; height: 100%; padding: 10px; font-family: monospace; font-size: 14px; border: 1px solid {}; box-sizing: border-box; background-color: {}; color: {};\">{}</textarea>",
        palette.border,
        palette.surface,
        palette.foreground,
        escape_html(editor_text)
    ));
    w.close("</div>");

    w.open("<div class=\"form-pane\" style=\"width: 50%;\">");
    write_form_pane(view, palette, &mut w);
    w.close("</div>");

    w.close("</div>");
    w.close("</body>");
    w.close("</html>");
    w.into_output()
}

fn write_form_pane(view: &FormView, palette: &Palette, w: &mut HtmlWriter<'_>) {
    match view {
        FormView::Placeholder { message } => {
            w.add_line(&format!(
                "<div class=\"form-placeholder\" style=\"padding: 16px; background-color: {}; color: {};\">{}</div>",
                palette.background,
                palette.foreground,
                escape_html(message)
            ));
        }
        FormView::Form(body) => write_form(body, palette, w),
    }
}

fn write_form(body: &FormBody, palette: &Palette, w: &mut HtmlWriter<'_>) {
    w.open(&format!(
        "<div style=\"height: 100vh; overflow-y: auto; padding: 16px; box-sizing: border-box; background-color: {};\">",
        palette.background
    ));
    w.open(&format!(
        "<form novalidate style=\"max-width: 600px; margin: 0 auto; background-color: {}; color: {}; padding: 20px; border-radius: 8px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);\">",
        palette.surface, palette.foreground
    ));
    w.add_line(&format!("<h1>{}</h1>", escape_html(&body.title)));
    w.add_line(&format!(
        "<p style=\"color: {};\">{}</p>",
        palette.muted,
        escape_html(&body.description)
    ));

    if let Some(message) = body.empty_message {
        w.add_line(&format!("<div>{}</div>", escape_html(message)));
    }
    for block in &body.blocks {
        write_block(block, palette, w);
    }

    w.add_line(&format!(
        "<button type=\"submit\" style=\"width: 100%; padding: 10px; background-color: {}; color: white; border: none; border-radius: 4px; cursor: pointer;\">{}</button>",
        palette.accent,
        escape_html(body.submit_label)
    ));
    w.close("</form>");
    w.close("</div>");
}

fn write_block(block: &FieldBlock, palette: &Palette, w: &mut HtmlWriter<'_>) {
    let field_style = format!(
        "width: 100%; padding: 8px; margin-top: 4px; border: 1px solid {}; border-radius: 4px;",
        palette.border
    );
    let id = escape_html(&block.id);
    let autofocus = if block.focused { " autofocus" } else { "" };

    w.open(&format!(
        "<div class=\"field\" data-field=\"{}\" style=\"margin-bottom: 16px;\">",
        id
    ));

    let marker = if block.required {
        format!("<span style=\"color: {};\"> *</span>", palette.error)
    } else {
        String::new()
    };
    w.add_line(&format!(
        "<label for=\"{}\">{}{}</label>",
        id,
        escape_html(&block.label),
        marker
    ));

    match &block.control {
        Control::Input {
            input_type,
            placeholder,
            value,
        } => {
            w.add_line(&format!(
                "<input type=\"{}\" id=\"{}\" name=\"{}\"{} value=\"{}\"{} style=\"{}\" />",
                input_type.as_str(),
                id,
                id,
                placeholder_attr(placeholder.as_deref()),
                escape_html(value),
                autofocus,
                field_style
            ));
        }
        Control::TextArea { placeholder, value } => {
            w.add_line(&format!(
                "<textarea id=\"{}\" name=\"{}\"{}{} style=\"{} resize: vertical;\">{}</textarea>",
                id,
                id,
                placeholder_attr(placeholder.as_deref()),
                autofocus,
                field_style,
                escape_html(value)
            ));
        }
        Control::Select { choices } => {
            w.open(&format!(
                "<select id=\"{}\" name=\"{}\"{} style=\"{}\">",
                id, id, autofocus, field_style
            ));
            for choice in choices {
                w.add_line(&format!(
                    "<option value=\"{}\"{}>{}</option>",
                    escape_html(&choice.value),
                    if choice.selected { " selected" } else { "" },
                    escape_html(&choice.label)
                ));
            }
            w.close("</select>");
        }
        Control::RadioGroup { choices } => {
            w.open("<div style=\"margin-top: 4px;\">");
            for (index, choice) in choices.iter().enumerate() {
                let focus = if index == 0 { autofocus } else { "" };
                write_radio(&block.id, choice, focus, w);
            }
            w.close("</div>");
        }
        Control::None => {}
    }

    if let Some(error) = &block.error {
        w.add_line(&format!(
            "<p class=\"field-error\" style=\"color: {}; font-size: 12px; margin-top: 4px;\">{}</p>",
            palette.error,
            escape_html(error)
        ));
    }

    w.close("</div>");
}

fn write_radio(field_id: &str, choice: &Choice, autofocus: &str, w: &mut HtmlWriter<'_>) {
    let control_id = escape_html(&radio_id(field_id, &choice.value));
    w.open("<div style=\"margin-bottom: 4px;\">");
    w.add_line(&format!(
        "<input type=\"radio\" id=\"{}\" name=\"{}\" value=\"{}\"{}{} />",
        control_id,
        escape_html(field_id),
        escape_html(&choice.value),
        if choice.selected { " checked" } else { "" },
        autofocus
    ));
    w.add_line(&format!(
        "<label for=\"{}\" style=\"margin-left: 8px;\">{}</label>",
        control_id,
        escape_html(&choice.label)
    ));
    w.close("</div>");
}

fn placeholder_attr(placeholder: Option<&str>) -> String {
    placeholder
        .map(|p| format!(" placeholder=\"{}\"", escape_html(p)))
        .unwrap_or_default()
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
