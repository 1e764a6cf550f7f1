mod row;

use eyre::{eyre, Result};
use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::config::CompiledSelectors;
use crate::{render_row, render_widget, serialize_characteristics, Characteristic};
pub use row::{Field, Row, RowId};
use row::RowArena;

/// A user action on a widget, as the page would deliver it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The add button was clicked.
    Add,
    /// Text was typed into one of a row's inputs.
    Input {
        row: RowId,
        field: Field,
        text: String,
    },
    /// A row's remove button was clicked.
    Remove(RowId),
}

/// One characteristics editor: its rows and the hidden field they are mirrored into.
///
/// Every mutation resyncs the hidden field before returning, so
/// [`CharacteristicsWidget::hidden_value`] always holds the serialized form of
/// the current non-empty rows in visual order.
#[derive(Debug, Clone)]
pub struct CharacteristicsWidget {
    name: String,
    rows: RowArena,
    hidden_value: String,
}

impl CharacteristicsWidget {
    /// An empty widget whose form field is named `name`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let mut widget = CharacteristicsWidget {
            name: name.into(),
            rows: RowArena::default(),
            hidden_value: String::new(),
        };
        widget.resync()?;
        Ok(widget)
    }

    /// A widget with one row per characteristic.
    pub fn with_characteristics(
        name: impl Into<String>,
        characteristics: impl IntoIterator<Item = Characteristic>,
    ) -> Result<Self> {
        let mut widget = CharacteristicsWidget::new(name)?;
        for c in characteristics {
            widget.rows.insert(Row {
                key: c.key,
                value: c.value,
            });
        }
        widget.resync()?;
        Ok(widget)
    }

    /// Initializes a widget from its container element.
    ///
    /// Fails, naming the missing part, when the container lacks its hidden
    /// field, row list or add button.
    pub(crate) fn from_container(
        container: ElementRef<'_>,
        selectors: &CompiledSelectors,
    ) -> Result<Self> {
        let field = container.select(&selectors.field).next();
        let name = container
            .value()
            .attr("data-name")
            .or_else(|| field.and_then(|f| f.value().attr("name")))
            .unwrap_or_default()
            .to_string();

        if field.is_none() {
            return Err(eyre!("widget `{name}` has no hidden field"));
        }
        let list = container
            .select(&selectors.list)
            .next()
            .ok_or_else(|| eyre!("widget `{name}` has no row list"))?;
        if container.select(&selectors.add_button).next().is_none() {
            return Err(eyre!("widget `{name}` has no add button"));
        }

        let mut widget = CharacteristicsWidget::new(name)?;
        // Text inputs drop line breaks from their value, as the browser would.
        for row in list.select(&selectors.row) {
            let input_value = |selector: &Selector| {
                row.select(selector)
                    .next()
                    .and_then(|input| input.value().attr("value"))
                    .unwrap_or_default()
                    .replace(['\r', '\n'], "")
            };
            widget.rows.insert(Row {
                key: input_value(&selectors.key_input),
                value: input_value(&selectors.value_input),
            });
        }
        widget.resync()?;
        debug!(widget = %widget.name, rows = widget.rows.len(), "initialized widget");
        Ok(widget)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The serialized value the form would submit.
    pub fn hidden_value(&self) -> &str {
        &self.hidden_value
    }

    /// Characteristics currently mirrored into the hidden field.
    pub fn characteristics(&self) -> Vec<Characteristic> {
        self.rows
            .iter()
            .filter_map(|(_, row)| row.characteristic())
            .collect()
    }

    /// All rows in visual order, blank ones included.
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &Row)> + '_ {
        self.rows.iter()
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.len() == 0
    }

    /// Appends a row pre-filled with `key` and `value`.
    pub fn add_row(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<RowId> {
        let id = self.rows.insert(Row {
            key: key.into(),
            value: value.into(),
        });
        debug!(widget = %self.name, %id, "added row");
        self.resync()?;
        Ok(id)
    }

    /// Replaces the text of one input of a row.
    pub fn set_field(&mut self, id: RowId, field: Field, text: impl Into<String>) -> Result<()> {
        self.rows.set(id, field, text.into())?;
        self.resync()
    }

    pub fn remove_row(&mut self, id: RowId) -> Result<Row> {
        let row = self.rows.remove(id)?;
        debug!(widget = %self.name, %id, "removed row");
        self.resync()?;
        Ok(row)
    }

    /// Applies one event. Returns the id of the row an `Add` created.
    pub fn handle(&mut self, event: WidgetEvent) -> Result<Option<RowId>> {
        match event {
            WidgetEvent::Add => self.add_row("", "").map(Some),
            WidgetEvent::Input { row, field, text } => {
                self.set_field(row, field, text)?;
                Ok(None)
            }
            WidgetEvent::Remove(row) => {
                self.remove_row(row)?;
                Ok(None)
            }
        }
    }

    /// Regenerates the hidden value from the rows.
    pub fn resync(&mut self) -> Result<()> {
        self.hidden_value = serialize_characteristics(&self.characteristics())?;
        debug!(widget = %self.name, value = %self.hidden_value, "resynced");
        Ok(())
    }

    /// Markup of the current row list, one rendered row per row.
    pub fn render_rows(&self) -> String {
        self.rows
            .iter()
            .map(|(_, row)| render_row(&row.key, &row.value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Markup of the whole widget holding its non-empty rows.
    pub fn render(&self) -> Result<String> {
        render_widget(&self.name, &self.characteristics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_characteristics;

    fn stored(widget: &CharacteristicsWidget) -> Vec<Characteristic> {
        parse_characteristics(widget.hidden_value())
    }

    #[test]
    fn new_widget_serializes_empty_array() -> Result<()> {
        let widget = CharacteristicsWidget::new("chars")?;
        assert_eq!(widget.hidden_value(), "[]");
        assert!(widget.is_empty());
        Ok(())
    }

    #[test]
    fn blank_row_contributes_nothing() -> Result<()> {
        let mut widget = CharacteristicsWidget::new("chars")?;
        let added = widget.handle(WidgetEvent::Add)?;
        assert!(added.is_some());
        assert_eq!(widget.len(), 1);
        assert_eq!(widget.hidden_value(), "[]");
        Ok(())
    }

    #[test]
    fn edits_are_trimmed_and_mirrored() -> Result<()> {
        let mut widget = CharacteristicsWidget::new("chars")?;
        let row = widget.add_row("", "")?;
        widget.handle(WidgetEvent::Input {
            row,
            field: Field::Key,
            text: "  Width ".into(),
        })?;
        assert_eq!(widget.hidden_value(), r#"[{"key":"Width","value":""}]"#);

        widget.handle(WidgetEvent::Input {
            row,
            field: Field::Value,
            text: "60 cm\n".into(),
        })?;
        assert_eq!(widget.hidden_value(), r#"[{"key":"Width","value":"60 cm"}]"#);
        assert_eq!(widget.row(row).map(|r| r.value.as_str()), Some("60 cm\n"));
        Ok(())
    }

    #[test]
    fn removing_only_row_yields_empty_array() -> Result<()> {
        let mut widget = CharacteristicsWidget::new("chars")?;
        let row = widget.add_row("Material", "MDF")?;
        assert_eq!(stored(&widget), vec![Characteristic::new("Material", "MDF")]);
        widget.handle(WidgetEvent::Remove(row))?;
        assert_eq!(widget.hidden_value(), "[]");
        Ok(())
    }

    #[test]
    fn removing_middle_row_preserves_order() -> Result<()> {
        let mut widget = CharacteristicsWidget::new("chars")?;
        widget.add_row("A", "1")?;
        let b = widget.add_row("B", "2")?;
        widget.add_row("C", "3")?;
        widget.remove_row(b)?;
        assert_eq!(
            stored(&widget),
            vec![Characteristic::new("A", "1"), Characteristic::new("C", "3")]
        );
        Ok(())
    }

    #[test]
    fn duplicate_keys_are_kept() -> Result<()> {
        let widget = CharacteristicsWidget::with_characteristics(
            "chars",
            vec![
                Characteristic::new("Color", "red"),
                Characteristic::new("Color", "blue"),
            ],
        )?;
        assert_eq!(stored(&widget).len(), 2);
        Ok(())
    }

    #[test]
    fn stale_row_is_an_error_and_changes_nothing() -> Result<()> {
        let mut widget = CharacteristicsWidget::new("chars")?;
        let a = widget.add_row("A", "1")?;
        widget.add_row("B", "2")?;
        widget.remove_row(a)?;
        let before = widget.hidden_value().to_string();

        assert!(widget.handle(WidgetEvent::Remove(a)).is_err());
        assert!(widget.set_field(a, Field::Key, "again").is_err());
        assert_eq!(widget.hidden_value(), before);
        assert_eq!(widget.len(), 1);
        Ok(())
    }

    #[test]
    fn render_rows_keeps_blank_rows() -> Result<()> {
        let mut widget = CharacteristicsWidget::new("chars")?;
        widget.add_row("Width", "60 cm")?;
        widget.add_row("", "")?;
        assert_eq!(widget.render_rows().matches("characteristic-row").count(), 2);
        assert!(widget.render()?.contains(r#"data-name="chars""#));
        Ok(())
    }
}
