use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::record::Record;

/// Filter vocabularies as declared by the catalog service.
///
/// These are taken as given rather than derived from the loaded records,
/// so they stay stable when only part of the catalog is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub processors: Vec<String>,
    #[serde(default)]
    pub memory: Vec<String>,
    #[serde(default)]
    pub storage: Vec<String>,
    #[serde(default)]
    pub displays: Vec<String>,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
            && self.processors.is_empty()
            && self.memory.is_empty()
            && self.storage.is_empty()
            && self.displays.is_empty()
    }
}

/// Immutable snapshot of loaded records plus the declared filter options
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    /// id -> position in `records`
    index: HashMap<String, usize>,
    options: FilterOptions,
}

impl Catalog {
    pub fn new(records: Vec<Record>, options: FilterOptions) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            let Some(ref id) = record.id else { continue };
            if index.contains_key(id) {
                warn!(id = %id, "duplicate laptop id, keeping the first occurrence");
                continue;
            }
            index.insert(id.clone(), pos);
        }

        Self {
            records,
            index,
            options,
        }
    }

    /// An empty snapshot, what a failed load produces
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every record in load order
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn by_id(&self, id: &str) -> Option<&Record> {
        self.position(id).map(|pos| &self.records[pos])
    }

    /// Load-order position of a record id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, brand: &str) -> Record {
        Record::from_value(&json!({"laptop_id": id, "brand": brand}))
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(
            vec![record("1", "HP"), record("2", "Lenovo")],
            FilterOptions::default(),
        );

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.by_id("2").and_then(|r| r.brand.as_deref()), Some("Lenovo"));
        assert!(catalog.by_id("3").is_none());
        assert_eq!(catalog.position("1"), Some(0));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = Catalog::new(
            vec![record("1", "HP"), record("1", "Dell")],
            FilterOptions::default(),
        );

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.by_id("1").and_then(|r| r.brand.as_deref()), Some("HP"));
    }

    #[test]
    fn test_identity_less_records_are_listed_but_not_indexed() {
        let anonymous = Record::from_value(&json!({"brand": "Acer"}));
        let catalog = Catalog::new(vec![anonymous], FilterOptions::default());

        assert_eq!(catalog.all().len(), 1);
        assert!(catalog.by_id("0").is_none());
    }

    #[test]
    fn test_options_decode_with_missing_lists() {
        let options: FilterOptions =
            serde_json::from_value(json!({"brands": ["HP", "Lenovo"]})).unwrap();
        assert_eq!(options.brands.len(), 2);
        assert!(options.displays.is_empty());
        assert!(!options.is_empty());
        assert!(FilterOptions::default().is_empty());
    }
}
