//! FILENAME: dataset/src/record.rs
//! The transaction record - the atomic entity of the dataset.
//!
//! Derived fields (year, month, period, profit margin) are computed once
//! when a record is built and treated as read-only afterward. They are
//! always consistent with their source fields because there is no other
//! way to obtain a `Transaction` than through `from_source`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// MONTH PERIOD
// ============================================================================

/// A year+month composite key, the grouping unit for time-series summaries.
/// Ordered chronologically; displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    pub fn new(year: i32, month: u32) -> Self {
        MonthPeriod { year, month }
    }

    /// The period containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        MonthPeriod {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// One retail transaction row, with derived fields computed at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub ship_date: NaiveDate,
    pub ship_mode: String,
    pub customer_id: String,
    pub customer_name: String,
    pub segment: String,
    /// Not part of the required header set; empty when the column is absent.
    pub country: String,
    pub city: String,
    pub state: String,
    pub region: String,
    /// Not part of the required header set; empty when the column is absent.
    pub product_id: String,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    /// Sales amount in currency units. Non-negative in well-formed data.
    pub sales: f64,
    pub quantity: f64,
    /// Discount fraction (0.0 - 1.0).
    pub discount: f64,
    /// Profit in currency units, signed.
    pub profit: f64,

    // Derived at load time, read-only afterward.
    /// Calendar year of the order date.
    pub year: i32,
    /// Calendar month of the order date (1-12).
    pub month: u32,
    /// Year+month composite key of the order date.
    pub period: MonthPeriod,
    /// profit / sales * 100. Non-finite when sales is zero; stored as-is
    /// and excluded from means downstream, never coerced.
    pub profit_margin: f64,
}

/// The source fields of a transaction, before derivation.
/// Used by the loader to construct records without a 19-argument call.
#[derive(Debug, Clone)]
pub struct SourceFields {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub ship_date: NaiveDate,
    pub ship_mode: String,
    pub customer_id: String,
    pub customer_name: String,
    pub segment: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub region: String,
    pub product_id: String,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    pub sales: f64,
    pub quantity: f64,
    pub discount: f64,
    pub profit: f64,
}

impl Transaction {
    /// Builds a record and computes its derived fields.
    pub fn from_source(src: SourceFields) -> Self {
        let year = src.order_date.year();
        let month = src.order_date.month();
        let period = MonthPeriod::from_date(src.order_date);
        let profit_margin = (src.profit / src.sales) * 100.0;

        Transaction {
            order_id: src.order_id,
            order_date: src.order_date,
            ship_date: src.ship_date,
            ship_mode: src.ship_mode,
            customer_id: src.customer_id,
            customer_name: src.customer_name,
            segment: src.segment,
            country: src.country,
            city: src.city,
            state: src.state,
            region: src.region,
            product_id: src.product_id,
            category: src.category,
            sub_category: src.sub_category,
            product_name: src.product_name,
            sales: src.sales,
            quantity: src.quantity,
            discount: src.discount,
            profit: src.profit,
            year,
            month,
            period,
            profit_margin,
        }
    }

    /// Ship date minus order date, in whole days. Recomputed from the two
    /// date fields so it can never drift from them. Negative values signal
    /// a data-integrity violation in the source file.
    pub fn shipping_days(&self) -> i64 {
        (self.ship_date - self.order_date).num_days()
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// The loaded record collection. Read-only once built: filtering and
/// aggregation operate on views over it, never on copies or mutations.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Transaction>,
    /// The file this dataset was loaded from.
    pub source: PathBuf,
}

impl Dataset {
    pub fn new(records: Vec<Transaction>, source: PathBuf) -> Self {
        Dataset { records, source }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.records.iter()
    }

    /// Earliest and latest order date, or `None` for an empty dataset.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.order_date).min()?;
        let max = self.records.iter().map(|r| r.order_date).max()?;
        Some((min, max))
    }

    /// Sorted unique values of one categorical field. This is what the
    /// presentation layer feeds into its multi-select widgets.
    fn unique_values<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Transaction) -> &str,
    {
        let mut values: Vec<String> = self
            .records
            .iter()
            .map(|r| field(r).to_string())
            .collect();
        values.sort();
        values.dedup();
        values
    }

    pub fn regions(&self) -> Vec<String> {
        self.unique_values(|r| &r.region)
    }

    pub fn categories(&self) -> Vec<String> {
        self.unique_values(|r| &r.category)
    }

    pub fn segments(&self) -> Vec<String> {
        self.unique_values(|r| &r.segment)
    }

    pub fn states(&self) -> Vec<String> {
        self.unique_values(|r| &r.state)
    }
}
