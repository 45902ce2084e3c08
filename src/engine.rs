//! Order-preserving filtering of a catalog snapshot.
//!
//! No hidden state: the same catalog and criteria always give the same
//! result, in catalog order.

use crate::catalog::Catalog;
use crate::filter::{FilterCriteria, PredicateSet};
use crate::record::Record;

/// Records of `catalog` that pass every criterion, in catalog order
pub fn apply<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Record> {
    let predicates = PredicateSet::new(criteria);
    catalog
        .all()
        .iter()
        .filter(|record| predicates.matches(record))
        .collect()
}

/// Load-order positions of the matching records
pub fn matching_positions(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<usize> {
    let predicates = PredicateSet::new(criteria);
    catalog
        .all()
        .iter()
        .enumerate()
        .filter(|(_, record)| predicates.matches(record))
        .map(|(pos, _)| pos)
        .collect()
}
