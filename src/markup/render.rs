use eyre::Result;

use super::escape_html;
use crate::{serialize_characteristics, Characteristic};

const KEY_PLACEHOLDER: &str = "Name (e.g. Width)";
const VALUE_PLACEHOLDER: &str = "Value (e.g. 60 cm)";

/// Markup of one editable row, pre-filled with `key` and `value`.
pub fn render_row(key: &str, value: &str) -> String {
    format!(
        r#"<div class="characteristic-row">
    <input type="text" class="char-key" placeholder="{KEY_PLACEHOLDER}" value="{}">
    <input type="text" class="char-value" placeholder="{VALUE_PLACEHOLDER}" value="{}">
    <button type="button" class="remove-characteristic-btn">✕</button>
</div>"#,
        escape_html(key),
        escape_html(value),
    )
}

/// Markup of a whole widget whose form field is named `name`.
///
/// The list holds one row per characteristic and the hidden field holds their
/// serialized form.
pub fn render_widget(name: &str, characteristics: &[Characteristic]) -> Result<String> {
    let rows = characteristics
        .iter()
        .map(|c| render_row(&c.key, &c.value))
        .collect::<Vec<_>>()
        .join("\n");
    let serialized = serialize_characteristics(characteristics)?;
    let name = escape_html(name);

    Ok(format!(
        r#"<div class="characteristics-widget" data-name="{name}">
<div class="characteristics-header">
    <h3>Product characteristics</h3>
    <p>Add structured characteristics of the product (e.g. "Width: 60 cm", "Material: MDF")</p>
</div>
<div class="characteristics-list">
{rows}
</div>
<button type="button" class="add-characteristic-btn">+ Add characteristic</button>
<textarea name="{name}" hidden>{}</textarea>
</div>"#,
        escape_html(&serialized),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn markup_in_row_text_stays_literal() {
        let html = Html::parse_fragment(&render_row("<b>x</b>", "a\"b' & c"));
        let key = Selector::parse("input.char-key").unwrap();
        let value = Selector::parse("input.char-value").unwrap();
        let bold = Selector::parse("b").unwrap();

        let key_attr = html
            .select(&key)
            .next()
            .and_then(|e| e.value().attr("value"));
        let value_attr = html
            .select(&value)
            .next()
            .and_then(|e| e.value().attr("value"));
        assert_eq!(key_attr, Some("<b>x</b>"));
        assert_eq!(value_attr, Some("a\"b' & c"));
        assert!(html.select(&bold).next().is_none());
    }

    #[test]
    fn widget_carries_rows_and_serialized_value() -> Result<()> {
        let list = vec![
            Characteristic::new("Width", "60 cm"),
            Characteristic::new("Note", "</textarea><b>"),
        ];
        let html = Html::parse_fragment(&render_widget("characteristics", &list)?);
        let rows = Selector::parse(".characteristics-list .characteristic-row").unwrap();
        let textarea = Selector::parse("textarea[name=characteristics]").unwrap();
        let bold = Selector::parse("b").unwrap();

        assert_eq!(html.select(&rows).count(), 2);
        let stored = html
            .select(&textarea)
            .next()
            .map(|e| e.text().collect::<String>())
            .unwrap_or_default();
        assert_eq!(stored, serialize_characteristics(&list)?);
        assert!(html.select(&bold).next().is_none());
        Ok(())
    }

    #[test]
    fn empty_widget_has_empty_array() -> Result<()> {
        let markup = render_widget("chars", &[])?;
        assert!(markup.contains(r#"<textarea name="chars" hidden>[]</textarea>"#));
        assert!(!markup.contains("characteristic-row"));
        Ok(())
    }
}
