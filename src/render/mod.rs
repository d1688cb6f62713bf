//! Form Renderer
//!
//! Turns the current document and form state into a view model, then into
//! HTML.

pub mod html;
pub mod view;

pub use html::{escape_html, render_html, render_page, RenderOptions};
pub use view::{build_view, Choice, Control, FieldBlock, FormBody, FormView, InputType};
