pub mod formatting;
pub mod html;

pub use formatting::{format_facet_definitions, render_text_report};
pub use html::{render_html_page, HtmlOptions};
