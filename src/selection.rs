use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::error::{LapviewError, Result};
use crate::record::Record;

/// Minimum number of selected laptops before a comparison can open
pub const MIN_COMPARE: usize = 2;

/// Laptops picked for side-by-side comparison, keyed by id.
///
/// Selection is best-effort against the current catalog: ids that no
/// longer resolve are kept but left out of [`SelectionSet::members`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present. Returns true if now selected.
    ///
    /// Blank ids never name a record and are ignored.
    pub fn toggle(&mut self, id: &str) -> bool {
        if id.trim().is_empty() {
            return false;
        }
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Toggle a record by its identity. Records without one cannot be selected.
    pub fn toggle_record(&mut self, record: &Record) -> Result<bool> {
        let id = record
            .id
            .as_deref()
            .ok_or_else(|| LapviewError::MissingIdentity(record.label()))?;
        Ok(self.toggle(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn can_compare(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }

    /// Selected records that exist in `catalog`, in catalog order
    pub fn members<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Record> {
        let mut positions: Vec<usize> = self
            .ids
            .iter()
            .filter_map(|id| catalog.position(id))
            .collect();
        positions.sort_unstable();
        positions.into_iter().map(|pos| &catalog.all()[pos]).collect()
    }
}
