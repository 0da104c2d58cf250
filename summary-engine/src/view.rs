//! FILENAME: summary-engine/src/view.rs
//! Typed row tables for the rendering surface.
//!
//! Each summary function returns a `Vec` of one of these structs. The
//! core's obligation ends here: the charting layer receives the rows with
//! the documented columns and types and draws whatever it likes.
//!
//! Means are `Option<f64>`: `None` states "undefined over these rows"
//! (empty view, or no finite contributions) and is never coerced to 0.

use dataset::MonthPeriod;
use serde::Serialize;

/// The four headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Sum of sales over the view.
    pub total_sales: f64,
    /// Sum of profit over the view.
    pub total_profit: f64,
    /// Distinct order identifiers in the view.
    pub total_orders: u64,
    /// Mean profit margin over records with a finite margin. `None` when
    /// no record contributes (empty view, or all margins non-finite).
    pub avg_profit_margin: Option<f64>,
}

/// One month of the sales/profit trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrendRow {
    pub period: MonthPeriod,
    pub sales: f64,
    pub profit: f64,
    pub orders: u64,
}

/// Category share of sales (pie chart).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySalesRow {
    pub category: String,
    pub sales: f64,
}

/// Regional sales (bar chart).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSalesRow {
    pub region: String,
    pub sales: f64,
}

/// State sales, used by the top-states ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSalesRow {
    pub state: String,
    pub sales: f64,
}

/// Per-segment sales, profit, and distinct orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSummaryRow {
    pub segment: String,
    pub sales: f64,
    pub profit: f64,
    pub orders: u64,
}

/// Product sales, used by the top-products ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSalesRow {
    pub product_name: String,
    pub sales: f64,
}

/// Sub-category sales/profit scatter point with its group-level margin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryRow {
    pub sub_category: String,
    pub sales: f64,
    pub profit: f64,
    /// profit / sales * 100 over the group; `None` when the group's sales
    /// sum is zero (the ratio would not be finite).
    pub profit_margin: Option<f64>,
}

/// Ship-mode distribution and average shipping interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipModeRow {
    pub ship_mode: String,
    pub orders: u64,
    pub sales: f64,
    /// Mean of ship date minus order date, in whole days.
    pub avg_shipping_days: Option<f64>,
}

/// Customer sales, used by the top-customers ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSalesRow {
    pub customer_name: String,
    pub sales: f64,
}

/// Distinct customers per (segment, region) cell (sunburst chart).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerDistributionRow {
    pub segment: String,
    pub region: String,
    pub customers: u64,
}

/// Per-city sales/profit/orders with a display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRow {
    pub state: String,
    pub city: String,
    /// "City, State" display label for axis ticks.
    pub location: String,
    pub sales: f64,
    pub profit: f64,
    pub orders: u64,
}
