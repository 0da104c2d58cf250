//! FILENAME: summary-engine/src/lib.rs
//! Aggregation subsystem for the Superstore analytics core.
//!
//! A fixed catalogue of pure functions, each taking a `FilteredView` and
//! returning one chart-ready row table (or the scalar `Metrics`). The
//! functions are independent and stateless; every one of them is safe on
//! an empty view.
//!
//! Layers:
//! - `group`: Insertion-ordered grouping and top-N primitives (HOW we reduce)
//! - `view`: Typed row tables handed to the rendering surface (WHAT we show)
//! - `engine`: The summary catalogue itself (WHICH reductions exist)

pub mod engine;
pub mod group;
pub mod view;

pub use engine::{
    customer_distribution, metrics, monthly_trend, sales_by_category, sales_by_region,
    segment_breakdown, shipping_breakdown, subcategory_performance, top_cities, top_customers,
    top_products, top_states,
};
pub use view::{
    CategorySalesRow, CityRow, CustomerDistributionRow, CustomerSalesRow, Metrics,
    MonthlyTrendRow, ProductSalesRow, RegionSalesRow, SegmentSummaryRow, ShipModeRow,
    StateSalesRow, SubCategoryRow,
};
