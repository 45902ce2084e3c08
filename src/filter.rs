use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LapviewError, Result};
use crate::record::Record;

/// Name of one criterion in [`FilterCriteria`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Brand,
    MinPrice,
    MaxPrice,
    MinRating,
    Processor,
    Memory,
    Storage,
    Display,
    /// Free-text search over every descriptive field
    Query,
}

impl FilterField {
    pub const ALL: [FilterField; 9] = [
        FilterField::Brand,
        FilterField::MinPrice,
        FilterField::MaxPrice,
        FilterField::MinRating,
        FilterField::Processor,
        FilterField::Memory,
        FilterField::Storage,
        FilterField::Display,
        FilterField::Query,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Brand => "brand",
            FilterField::MinPrice => "minPrice",
            FilterField::MaxPrice => "maxPrice",
            FilterField::MinRating => "minRating",
            FilterField::Processor => "processor",
            FilterField::Memory => "memory",
            FilterField::Storage => "storage",
            FilterField::Display => "display",
            FilterField::Query => "query",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FilterField::MinPrice | FilterField::MaxPrice | FilterField::MinRating
        )
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = LapviewError;

    /// Accepts `minPrice`, `min_price` and `min-price` alike
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        FilterField::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == key)
            .ok_or_else(|| LapviewError::UnknownFilter(s.to_string()))
    }
}

/// The active filter settings. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "min_price")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "max_price")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "min_rating")]
    pub min_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl FilterCriteria {
    /// Set a criterion from its text form. Blank text unsets it.
    ///
    /// Numeric criteria must parse as a finite number; on error the
    /// criteria are left untouched.
    pub fn set(&mut self, field: FilterField, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            self.unset(field);
            return Ok(());
        }

        if field.is_numeric() {
            let number = value
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| LapviewError::InvalidCriterion {
                    field: field.to_string(),
                    value: value.to_string(),
                })?;
            *self.number_slot(field) = Some(number);
        } else {
            *self.text_slot(field) = Some(value.to_string());
        }
        Ok(())
    }

    pub fn unset(&mut self, field: FilterField) {
        if field.is_numeric() {
            *self.number_slot(field) = None;
        } else {
            *self.text_slot(field) = None;
        }
    }

    /// Current value of a criterion in text form. Blank text and
    /// non-finite bounds read as unset, matching how they filter.
    pub fn get(&self, field: FilterField) -> Option<String> {
        match field {
            FilterField::MinPrice => bound_text(self.min_price),
            FilterField::MaxPrice => bound_text(self.max_price),
            FilterField::MinRating => bound_text(self.min_rating),
            FilterField::Brand => set_text(&self.brand),
            FilterField::Processor => set_text(&self.processor),
            FilterField::Memory => set_text(&self.memory),
            FilterField::Storage => set_text(&self.storage),
            FilterField::Display => set_text(&self.display),
            FilterField::Query => set_text(&self.query),
        }
    }

    /// Criteria that are currently set, in declaration order
    pub fn active(&self) -> Vec<(FilterField, String)> {
        FilterField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|v| (field, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// Evaluate one record (AND logic - all set criteria must pass)
    pub fn matches(&self, record: &Record) -> bool {
        PredicateSet::new(self).matches(record)
    }

    fn number_slot(&mut self, field: FilterField) -> &mut Option<f64> {
        match field {
            FilterField::MinPrice => &mut self.min_price,
            FilterField::MaxPrice => &mut self.max_price,
            _ => &mut self.min_rating,
        }
    }

    fn text_slot(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Brand => &mut self.brand,
            FilterField::Processor => &mut self.processor,
            FilterField::Memory => &mut self.memory,
            FilterField::Storage => &mut self.storage,
            FilterField::Display => &mut self.display,
            _ => &mut self.query,
        }
    }
}

/// Criteria compiled for repeated evaluation: needles lowercased once,
/// blank text and non-finite bounds dropped.
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    brand: Option<String>,
    processor: Option<String>,
    memory: Option<String>,
    storage: Option<String>,
    display: Option<String>,
    query: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    min_rating: Option<f64>,
}

impl PredicateSet {
    pub fn new(criteria: &FilterCriteria) -> Self {
        Self {
            brand: needle(&criteria.brand),
            processor: needle(&criteria.processor),
            memory: needle(&criteria.memory),
            storage: needle(&criteria.storage),
            display: needle(&criteria.display),
            query: needle(&criteria.query),
            min_price: criteria.min_price.filter(|n| n.is_finite()),
            max_price: criteria.max_price.filter(|n| n.is_finite()),
            min_rating: criteria.min_rating.filter(|n| n.is_finite()),
        }
    }

    /// True iff the record passes every set criterion
    pub fn matches(&self, record: &Record) -> bool {
        let text_checks = [
            (&self.brand, &record.brand),
            (&self.processor, &record.processor),
            (&self.memory, &record.memory),
            (&self.storage, &record.storage),
            (&self.display, &record.display),
        ];
        for (needle, haystack) in text_checks {
            if let Some(needle) = needle {
                if !contains_ci(haystack.as_deref(), needle) {
                    return false;
                }
            }
        }

        if let Some(ref query) = self.query {
            let searchable = [
                &record.brand,
                &record.model,
                &record.processor,
                &record.memory,
                &record.storage,
                &record.display,
            ];
            if !searchable.iter().any(|f| contains_ci(f.as_deref(), query)) {
                return false;
            }
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let price = record.price();
            if self.min_price.is_some_and(|min| price < min) {
                return false;
            }
            if self.max_price.is_some_and(|max| price > max) {
                return false;
            }
        }

        if let Some(min) = self.min_rating {
            if record.rating() < min {
                return false;
            }
        }

        true
    }
}

fn set_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bound_text(value: Option<f64>) -> Option<String> {
    value.filter(|n| n.is_finite()).map(|n| n.to_string())
}

fn needle(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Case-insensitive containment; a missing field never contains anything
fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}
