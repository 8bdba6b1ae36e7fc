//! A single upstream row: field name → [Cell].

use crate::cell::Cell;
use std::collections::HashMap;

static ABSENT: Cell = Cell::Absent;

/// One row of input, keyed by field name.
///
/// Records are transient: built for one file, projected, written,
/// discarded. Keys that no schema mentions are simply never read; schema
/// fields without a key read as [Cell::Absent].
#[derive(Debug, Clone, Default)]
pub struct Record {
    cells: HashMap<String, Cell>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, cell: Cell) {
        self.cells.insert(name.into(), cell);
    }

    /// Returns the cell for `name`, or [Cell::Absent] when the row does not
    /// carry it.
    pub fn get(&self, name: &str) -> &Cell {
        self.cells.get(name).unwrap_or(&ABSENT)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    /// Moves a cell to a new name if the target is not already set.
    ///
    /// Used for the schema aliases some exports carry (`DSK_TINC`,
    /// `DSK_TSPOUS`).
    pub fn rename(&mut self, from: &str, to: &str) {
        if self.cells.contains_key(to) {
            return;
        }
        if let Some(cell) = self.cells.remove(from) {
            self.cells.insert(to.to_string(), cell);
        }
    }

}

impl<N: Into<String>, C: Into<Cell>> FromIterator<(N, C)> for Record {
    fn from_iter<T: IntoIterator<Item = (N, C)>>(iter: T) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(n, c)| (n.into(), c.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_as_absent() {
        let record = Record::new();
        assert!(record.get("DSW_FNAME").is_absent());
    }

    #[test]
    fn rename_respects_existing_targets() {
        let mut record: Record = [("DSK_TINC", "100")].into_iter().collect();
        record.rename("DSK_TINC", "DSK_INC");
        assert_eq!(record.get("DSK_INC"), &Cell::Text("100".into()));
        assert!(!record.contains("DSK_TINC"));

        let mut record: Record =
            [("DSK_TINC", "100"), ("DSK_INC", "200")].into_iter().collect();
        record.rename("DSK_TINC", "DSK_INC");
        assert_eq!(record.get("DSK_INC"), &Cell::Text("200".into()));
    }
}
