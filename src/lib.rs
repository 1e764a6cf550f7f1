//! Edit product characteristics as a list of key/value rows.
//!
//! `CharacteristicsWidget` holds the rows of one editor and keeps the
//! serialized value of its hidden form field in sync on every change.
//! `Page` finds and initializes every widget in server-rendered markup,
//! and `render_widget` produces that markup.
//!
//! The serialized value is a JSON array of `{"key": .., "value": ..}`
//! objects holding the non-empty rows, trimmed, in visual order.

mod characteristic;
mod config;
mod markup;
mod page;
mod widget;

pub use characteristic::{parse_characteristics, serialize_characteristics, Characteristic};
pub use config::Selectors;
use header::{HeaderMap, HeaderValue};
pub use markup::{escape_html, render_row, render_widget};
pub use page::Page;
use reqwest::header;
pub use url::Url;
pub use widget::{CharacteristicsWidget, Field, Row, RowId, WidgetEvent};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Headers sent when fetching pages that hold widgets.
fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9"),
    );
    headers
}
