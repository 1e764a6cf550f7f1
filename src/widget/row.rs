use eyre::{eyre, Result};
use std::collections::BTreeMap;

use crate::Characteristic;

/// Stable identity of a row within its widget.
///
/// Ids are never reused, so an id held after its row was removed simply stops
/// resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(usize);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Which of the two inputs of a row is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Key,
    Value,
}

/// The text currently typed into a row's inputs, untrimmed.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub value: String,
}

impl Row {
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Key => &self.key,
            Field::Value => &self.value,
        }
    }

    fn text_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Key => &mut self.key,
            Field::Value => &mut self.value,
        }
    }

    /// The characteristic this row contributes to the serialized value, if any.
    pub fn characteristic(&self) -> Option<Characteristic> {
        Characteristic::trimmed(&self.key, &self.value)
    }
}

/// Ordered rows of one widget.
///
/// Rows only ever enter at the bottom and ids grow monotonically, so id order
/// is visual order. Lookup, edit and removal are O(log n) and removed rows
/// free their storage.
#[derive(Default, Debug, Clone)]
pub(crate) struct RowArena {
    rows: BTreeMap<RowId, Row>,
    next_id: usize,
}

impl RowArena {
    /// Appends a row at the bottom. Every row, new or discovered in markup,
    /// enters the arena here.
    pub fn insert(&mut self, row: Row) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.insert(id, row);
        id
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.get(&id)
    }

    pub fn set(&mut self, id: RowId, field: Field, text: String) -> Result<()> {
        let row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| eyre!("{id} is not part of this widget"))?;
        *row.text_mut(field) = text;
        Ok(())
    }

    pub fn remove(&mut self, id: RowId) -> Result<Row> {
        self.rows
            .remove(&id)
            .ok_or_else(|| eyre!("{id} is not part of this widget"))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows in visual order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &Row)> + '_ {
        self.rows.iter().map(|(id, row)| (*id, row))
    }
}
