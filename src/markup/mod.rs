mod escape;
mod render;

pub use escape::escape_html;
pub use render::{render_row, render_widget};
