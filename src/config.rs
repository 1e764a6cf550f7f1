use eyre::{eyre, Result, WrapErr};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// CSS selectors describing the markup of a widget.
///
/// The defaults match the markup produced by [`crate::render_widget`].
/// Fields missing from a configuration file keep their default.
pub struct Selectors {
    /// Marks a widget container.
    pub container: String,
    /// The hidden field holding the serialized value, inside a container.
    pub field: String,
    /// The element holding the rows, inside a container.
    pub list: String,
    /// The add button, inside a container.
    pub add_button: String,
    /// One row, inside the list.
    pub row: String,
    /// Key input, inside a row.
    pub key_input: String,
    /// Value input, inside a row.
    pub value_input: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            container: ".characteristics-widget".into(),
            field: "textarea".into(),
            list: ".characteristics-list".into(),
            add_button: ".add-characteristic-btn".into(),
            row: ".characteristic-row".into(),
            key_input: ".char-key".into(),
            value_input: ".char-value".into(),
        }
    }
}

impl Selectors {
    /// Loads selectors from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading selectors from {}", path.display()))?;
        serde_json::from_str(&text)
            .wrap_err_with(|| format!("parsing selectors from {}", path.display()))
    }

    /// Checks that every selector parses, failing on the first invalid one.
    pub fn validate(&self) -> Result<()> {
        self.compile().map(|_| ())
    }

    pub(crate) fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            container: parse(&self.container)?,
            field: parse(&self.field)?,
            list: parse(&self.list)?,
            add_button: parse(&self.add_button)?,
            row: parse(&self.row)?,
            key_input: parse(&self.key_input)?,
            value_input: parse(&self.value_input)?,
        })
    }
}

fn parse(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| eyre!("invalid selector `{selector}`: {e}"))
}

/// [`Selectors`] ready to be matched against a parsed document.
#[derive(Debug, Clone)]
pub(crate) struct CompiledSelectors {
    pub(crate) container: Selector,
    pub(crate) field: Selector,
    pub(crate) list: Selector,
    pub(crate) add_button: Selector,
    pub(crate) row: Selector,
    pub(crate) key_input: Selector,
    pub(crate) value_input: Selector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Selectors::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() -> Result<()> {
        let selectors: Selectors = serde_json::from_str(r#"{"container": "[data-widget=chars]"}"#)?;
        assert_eq!(selectors.container, "[data-widget=chars]");
        assert_eq!(selectors.list, Selectors::default().list);
        Ok(())
    }

    #[test]
    fn invalid_selector_is_reported() {
        let selectors = Selectors {
            row: "div[".into(),
            ..Selectors::default()
        };
        let err = selectors.validate().err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("div["), "{err}");
    }
}
