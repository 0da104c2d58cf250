//! FILENAME: filter-engine/src/engine.rs
//! Predicate evaluation and the filtered view.
//!
//! `apply` is total: malformed criteria (start after end, empty membership
//! sets) degrade to an empty view instead of failing. The view stores row
//! indices into a shared `Arc<Dataset>`, so filtering never copies or
//! mutates records and the subset invariant holds by construction.

use crate::criteria::FilterCriteria;
use dataset::{Dataset, Transaction};
use std::sync::Arc;

// ============================================================================
// FILTERED VIEW
// ============================================================================

/// The records matching a set of filter criteria, as row indices over a
/// shared dataset. Recomputed from scratch on every criteria change.
#[derive(Debug, Clone)]
pub struct FilteredView {
    dataset: Arc<Dataset>,
    rows: Vec<u32>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The dataset this view selects from.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Matching row indices, in dataset order.
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// Iterates the matching records in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.rows
            .iter()
            .map(move |&i| &self.dataset.records[i as usize])
    }

    /// Applies `criteria` to this view's rows, producing a narrower view.
    /// Refining with the criteria that produced the view is a no-op
    /// (filtering is idempotent).
    pub fn refine(&self, criteria: &FilterCriteria) -> FilteredView {
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&i| matches(criteria, &self.dataset.records[i as usize]))
            .collect();
        FilteredView {
            dataset: Arc::clone(&self.dataset),
            rows,
        }
    }
}

// ============================================================================
// PREDICATE
// ============================================================================

/// Whether one record satisfies every active predicate.
fn matches(criteria: &FilterCriteria, tx: &Transaction) -> bool {
    if tx.order_date < criteria.start || tx.order_date > criteria.end {
        return false;
    }
    // Membership sets: empty means "match nothing", by the literal
    // semantics, even though the UI default avoids it.
    if !criteria.regions.contains(&tx.region) {
        return false;
    }
    if !criteria.categories.contains(&tx.category) {
        return false;
    }
    if !criteria.segments.contains(&tx.segment) {
        return false;
    }
    // States alone are asymmetric: empty disables the predicate.
    if !criteria.states.is_empty() && !criteria.states.contains(&tx.state) {
        return false;
    }
    true
}

/// Applies the criteria to the full dataset, producing a filtered view.
pub fn apply(dataset: &Arc<Dataset>, criteria: &FilterCriteria) -> FilteredView {
    let rows = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, tx)| matches(criteria, tx))
        .map(|(i, _)| i as u32)
        .collect();
    FilteredView {
        dataset: Arc::clone(dataset),
        rows,
    }
}
