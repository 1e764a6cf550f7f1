use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single characteristic (key-value pair) of a product.
pub struct Characteristic {
    /// The name of the characteristic, e.g. `Width`.
    pub key: String,
    /// The value of the characteristic, e.g. `60 cm`.
    pub value: String,
}

impl Characteristic {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Characteristic {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Trims both fields and returns `None` when nothing is left of either.
    ///
    /// Trimming follows the browser's `String.prototype.trim`, see [`trim_form_text`].
    pub fn trimmed(key: &str, value: &str) -> Option<Self> {
        let (key, value) = (trim_form_text(key), trim_form_text(value));
        if key.is_empty() && value.is_empty() {
            None
        } else {
            Some(Characteristic::new(key, value))
        }
    }
}

/// Strips leading and trailing whitespace the way a browser trims form text.
///
/// Unicode `White_Space` plus U+FEFF (byte order mark), minus U+0085 (next line).
fn trim_form_text(text: &str) -> &str {
    text.trim_matches(|c: char| (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}')
}

/// Encodes characteristics as the compact JSON array stored in the form field.
pub fn serialize_characteristics(characteristics: &[Characteristic]) -> Result<String> {
    Ok(serde_json::to_string(characteristics)?)
}

/// Reads a stored value back into characteristics.
///
/// Never fails: anything that is not a JSON array yields an empty list, and
/// array elements that are not objects are skipped.
pub fn parse_characteristics(raw: &str) -> Vec<Characteristic> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let object = item.as_object()?;
            Some(Characteristic {
                key: field_text(object.get("key")),
                value: field_text(object.get("value")),
            })
        })
        .collect()
}

fn field_text(field: Option<&Value>) -> String {
    match field {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
