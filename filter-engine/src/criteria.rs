//! FILENAME: filter-engine/src/criteria.rs
//! Filter criteria - the serializable selection state.
//!
//! These structures are designed to be:
//! - Serializable (for session state and debugging)
//! - Produced by the presentation layer's widgets and passed in unchanged
//! - Immutable snapshots of user intent

use chrono::NaiveDate;
use dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A conjunction of predicates over the dataset.
///
/// Set semantics are deliberately asymmetric and must stay that way:
/// - `regions`, `categories`, `segments`: membership sets. An empty set
///   matches NOTHING. The UI avoids this by defaulting each to all
///   observed values, but the engine implements the literal semantics.
/// - `states`: empty means "do not filter by state" (the UI default);
///   non-empty restricts to exactly those states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive start of the order-date interval.
    pub start: NaiveDate,
    /// Inclusive end of the order-date interval.
    pub end: NaiveDate,
    pub regions: HashSet<String>,
    pub categories: HashSet<String>,
    pub segments: HashSet<String>,
    pub states: HashSet<String>,
}

impl FilterCriteria {
    /// Criteria with the given date interval and empty sets. Note that
    /// empty `regions`/`categories`/`segments` match nothing; callers
    /// normally fill them in (or use `matching_all`).
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        FilterCriteria {
            start,
            end,
            regions: HashSet::new(),
            categories: HashSet::new(),
            segments: HashSet::new(),
            states: HashSet::new(),
        }
    }

    /// Criteria mirroring the dashboard's default widget state: the full
    /// date span of the data, every observed region/category/segment
    /// selected, and no state restriction. Matches every record of a
    /// non-empty dataset.
    pub fn matching_all(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_span()
            .unwrap_or_else(|| (NaiveDate::MAX, NaiveDate::MIN));
        FilterCriteria {
            start,
            end,
            regions: dataset.regions().into_iter().collect(),
            categories: dataset.categories().into_iter().collect(),
            segments: dataset.segments().into_iter().collect(),
            states: HashSet::new(),
        }
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }
}
