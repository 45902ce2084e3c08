//! ExploreView - one browse/filter/compare session over a catalog snapshot
//!
//! The view owns its snapshot, criteria and selection. A reload swaps the
//! whole snapshot in one step, so readers see either the old catalog or the
//! new one. Every change to criteria or snapshot recomputes the filtered
//! view from scratch.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::compare::ComparisonTable;
use crate::engine;
use crate::error::Result;
use crate::fetch::{load_catalog, CatalogSource};
use crate::filter::{FilterCriteria, FilterField};
use crate::record::Record;
use crate::selection::{SelectionSet, MIN_COMPARE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing loaded yet
    Idle,
    /// A load is in flight
    Loading,
    /// Browsing the filtered list
    Ready,
    /// Comparison is open
    Comparing,
}

#[derive(Debug)]
pub struct ExploreView {
    state: ViewState,
    catalog: Arc<Catalog>,
    criteria: FilterCriteria,
    selection: SelectionSet,
    /// Catalog positions of the records passing `criteria`
    filtered: Vec<usize>,
}

impl Default for ExploreView {
    fn default() -> Self {
        Self::new()
    }
}

impl ExploreView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
            catalog: Arc::new(Catalog::empty()),
            criteria: FilterCriteria::default(),
            selection: SelectionSet::new(),
            filtered: Vec::new(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Mark a load as started; the old snapshot stays visible until it lands
    pub fn begin_load(&mut self) {
        self.transition(ViewState::Loading);
    }

    /// Replace the snapshot and re-filter
    pub fn finish_load(&mut self, catalog: Catalog) {
        self.catalog = Arc::new(catalog);
        debug!(records = self.catalog.len(), "catalog snapshot replaced");
        self.refilter();
        self.transition(ViewState::Ready);
    }

    /// Load from a source synchronously. Failures land as an empty catalog.
    pub fn load(&mut self, source: &dyn CatalogSource) {
        self.begin_load();
        let catalog = load_catalog(source);
        self.finish_load(catalog);
    }

    /// Records passing the current criteria, in catalog order
    pub fn filtered_view(&self) -> Vec<&Record> {
        self.filtered
            .iter()
            .map(|&pos| &self.catalog.all()[pos])
            .collect()
    }

    /// Set one criterion from its text form (blank unsets it)
    pub fn set_criterion(&mut self, field: FilterField, value: &str) -> Result<()> {
        self.criteria.set(field, value)?;
        self.refilter();
        Ok(())
    }

    /// Replace all criteria at once
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    pub fn clear_criteria(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }

    /// Toggle an id in the comparison selection. Returns true if now selected;
    /// blank ids are ignored.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        let selected = self.selection.toggle(id);
        self.close_if_underpopulated();
        selected
    }

    /// Toggle a record; records without an id are rejected
    pub fn toggle_record(&mut self, record: &Record) -> Result<bool> {
        let selected = self.selection.toggle_record(record)?;
        self.close_if_underpopulated();
        Ok(selected)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.close_if_underpopulated();
    }

    pub fn can_compare(&self) -> bool {
        self.selection.can_compare()
    }

    /// Open the comparison. No-op (returns false) unless ready with 2+ selected
    /// laptops that resolve in the current snapshot.
    pub fn compare(&mut self) -> bool {
        if self.state == ViewState::Ready
            && self.can_compare()
            && self.comparison_set().len() >= MIN_COMPARE
        {
            self.transition(ViewState::Comparing);
            true
        } else {
            false
        }
    }

    pub fn close_comparison(&mut self) {
        if self.state == ViewState::Comparing {
            self.transition(ViewState::Ready);
        }
    }

    /// Selected records that still resolve in the current snapshot
    pub fn comparison_set(&self) -> Vec<&Record> {
        self.selection.members(&self.catalog)
    }

    pub fn comparison_table(&self) -> ComparisonTable {
        ComparisonTable::build(&self.comparison_set())
    }

    fn refilter(&mut self) {
        self.filtered = engine::matching_positions(&self.catalog, &self.criteria);
        debug!(
            matched = self.filtered.len(),
            total = self.catalog.len(),
            "filtered view recomputed"
        );
        self.close_if_underpopulated();
    }

    fn close_if_underpopulated(&mut self) {
        if self.state == ViewState::Comparing && self.comparison_set().len() < MIN_COMPARE {
            self.transition(ViewState::Ready);
        }
    }

    fn transition(&mut self, next: ViewState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "view state");
            self.state = next;
        }
    }
}
