//! FILENAME: summary-engine/src/engine.rs
//! The summary catalogue.
//!
//! Every function here is a pure fold over a `FilteredView`:
//! - group keys come from the record's categorical fields,
//! - reducers are sum, mean, or distinct-count,
//! - group order is first-encounter order (monthly trend additionally
//!   sorts chronologically),
//! - an empty view produces an empty table; scalar means become `None`.
//!
//! Aggregates are always computed over the view, never over the full
//! dataset behind it.

use crate::group::{top_n, GroupMap};
use crate::view::{
    CategorySalesRow, CityRow, CustomerDistributionRow, CustomerSalesRow, Metrics,
    MonthlyTrendRow, ProductSalesRow, RegionSalesRow, SegmentSummaryRow, ShipModeRow,
    StateSalesRow, SubCategoryRow,
};
use dataset::MonthPeriod;
use filter_engine::FilteredView;
use rustc_hash::FxHashSet;

// ============================================================================
// ACCUMULATORS
// ============================================================================

#[derive(Default)]
struct SalesAcc {
    sales: f64,
}

/// Sum of sales/profit plus distinct order identifiers.
#[derive(Default)]
struct OrderAcc {
    sales: f64,
    profit: f64,
    orders: FxHashSet<String>,
}

#[derive(Default)]
struct ShipAcc {
    orders: FxHashSet<String>,
    sales: f64,
    days_sum: f64,
    days_count: u64,
}

// ============================================================================
// SCALAR METRICS
// ============================================================================

/// The headline metrics over the view. The margin mean excludes records
/// whose margin is not finite (sales of zero); with no finite margin at
/// all the mean is `None`, never a silent zero.
pub fn metrics(view: &FilteredView) -> Metrics {
    let mut total_sales = 0.0;
    let mut total_profit = 0.0;
    let mut orders: FxHashSet<&str> = FxHashSet::default();
    let mut margin_sum = 0.0;
    let mut margin_count = 0u64;

    for tx in view.iter() {
        total_sales += tx.sales;
        total_profit += tx.profit;
        orders.insert(&tx.order_id);
        if tx.profit_margin.is_finite() {
            margin_sum += tx.profit_margin;
            margin_count += 1;
        }
    }

    Metrics {
        total_sales,
        total_profit,
        total_orders: orders.len() as u64,
        avg_profit_margin: (margin_count > 0).then(|| margin_sum / margin_count as f64),
    }
}

// ============================================================================
// TIME SERIES
// ============================================================================

/// Sales, profit, and distinct orders per month, chronologically.
pub fn monthly_trend(view: &FilteredView) -> Vec<MonthlyTrendRow> {
    let mut groups: GroupMap<MonthPeriod, OrderAcc> = GroupMap::new();
    for tx in view.iter() {
        let acc = groups.slot(tx.period);
        acc.sales += tx.sales;
        acc.profit += tx.profit;
        acc.orders.insert(tx.order_id.clone());
    }

    let mut rows: Vec<MonthlyTrendRow> = groups
        .into_entries()
        .into_iter()
        .map(|(period, acc)| MonthlyTrendRow {
            period,
            sales: acc.sales,
            profit: acc.profit,
            orders: acc.orders.len() as u64,
        })
        .collect();
    rows.sort_by_key(|r| r.period);
    rows
}

// ============================================================================
// SINGLE-KEY SALES GROUPINGS
// ============================================================================

fn sales_by<F>(view: &FilteredView, key: F) -> Vec<(String, f64)>
where
    F: Fn(&dataset::Transaction) -> &str,
{
    let mut groups: GroupMap<String, SalesAcc> = GroupMap::new();
    for tx in view.iter() {
        groups.slot(key(tx).to_string()).sales += tx.sales;
    }
    groups
        .into_entries()
        .into_iter()
        .map(|(k, acc)| (k, acc.sales))
        .collect()
}

/// Sales sum per category.
pub fn sales_by_category(view: &FilteredView) -> Vec<CategorySalesRow> {
    sales_by(view, |tx| &tx.category)
        .into_iter()
        .map(|(category, sales)| CategorySalesRow { category, sales })
        .collect()
}

/// Sales sum per region.
pub fn sales_by_region(view: &FilteredView) -> Vec<RegionSalesRow> {
    sales_by(view, |tx| &tx.region)
        .into_iter()
        .map(|(region, sales)| RegionSalesRow { region, sales })
        .collect()
}

/// The `n` states with the largest sales sums, descending.
pub fn top_states(view: &FilteredView, n: usize) -> Vec<StateSalesRow> {
    let rows = sales_by(view, |tx| &tx.state)
        .into_iter()
        .map(|(state, sales)| StateSalesRow { state, sales })
        .collect();
    top_n(rows, n, |r| r.sales)
}

/// The `n` products with the largest sales sums, descending.
pub fn top_products(view: &FilteredView, n: usize) -> Vec<ProductSalesRow> {
    let rows = sales_by(view, |tx| &tx.product_name)
        .into_iter()
        .map(|(product_name, sales)| ProductSalesRow { product_name, sales })
        .collect();
    top_n(rows, n, |r| r.sales)
}

/// The `n` customers with the largest sales sums, descending.
pub fn top_customers(view: &FilteredView, n: usize) -> Vec<CustomerSalesRow> {
    let rows = sales_by(view, |tx| &tx.customer_name)
        .into_iter()
        .map(|(customer_name, sales)| CustomerSalesRow { customer_name, sales })
        .collect();
    top_n(rows, n, |r| r.sales)
}

// ============================================================================
// MULTI-REDUCER GROUPINGS
// ============================================================================

/// Sales, profit, and distinct orders per customer segment.
pub fn segment_breakdown(view: &FilteredView) -> Vec<SegmentSummaryRow> {
    let mut groups: GroupMap<String, OrderAcc> = GroupMap::new();
    for tx in view.iter() {
        let acc = groups.slot(tx.segment.clone());
        acc.sales += tx.sales;
        acc.profit += tx.profit;
        acc.orders.insert(tx.order_id.clone());
    }
    groups
        .into_entries()
        .into_iter()
        .map(|(segment, acc)| SegmentSummaryRow {
            segment,
            sales: acc.sales,
            profit: acc.profit,
            orders: acc.orders.len() as u64,
        })
        .collect()
}

/// Sales, profit, and the group-level margin per sub-category. The margin
/// is derived from the group sums, not averaged per record; a zero sales
/// sum makes it `None` instead of a non-finite number.
pub fn subcategory_performance(view: &FilteredView) -> Vec<SubCategoryRow> {
    let mut groups: GroupMap<String, OrderAcc> = GroupMap::new();
    for tx in view.iter() {
        let acc = groups.slot(tx.sub_category.clone());
        acc.sales += tx.sales;
        acc.profit += tx.profit;
    }
    groups
        .into_entries()
        .into_iter()
        .map(|(sub_category, acc)| SubCategoryRow {
            sub_category,
            sales: acc.sales,
            profit: acc.profit,
            profit_margin: (acc.sales != 0.0).then(|| (acc.profit / acc.sales) * 100.0),
        })
        .collect()
}

/// Distinct orders, sales, and mean shipping days per ship mode.
///
/// A negative shipping interval (ship date before order date) is a
/// data-integrity violation in the source file. Such records still
/// aggregate, but the count is surfaced as a warning.
pub fn shipping_breakdown(view: &FilteredView) -> Vec<ShipModeRow> {
    let mut groups: GroupMap<String, ShipAcc> = GroupMap::new();
    let mut negative_intervals = 0u64;

    for tx in view.iter() {
        let days = tx.shipping_days();
        if days < 0 {
            negative_intervals += 1;
        }
        let acc = groups.slot(tx.ship_mode.clone());
        acc.orders.insert(tx.order_id.clone());
        acc.sales += tx.sales;
        acc.days_sum += days as f64;
        acc.days_count += 1;
    }

    if negative_intervals > 0 {
        log::warn!(
            "{} record(s) ship before their order date; check the source data",
            negative_intervals
        );
    }

    groups
        .into_entries()
        .into_iter()
        .map(|(ship_mode, acc)| ShipModeRow {
            ship_mode,
            orders: acc.orders.len() as u64,
            sales: acc.sales,
            avg_shipping_days: (acc.days_count > 0)
                .then(|| acc.days_sum / acc.days_count as f64),
        })
        .collect()
}

/// Distinct customers per (segment, region) pair.
pub fn customer_distribution(view: &FilteredView) -> Vec<CustomerDistributionRow> {
    let mut groups: GroupMap<(String, String), FxHashSet<String>> = GroupMap::new();
    for tx in view.iter() {
        groups
            .slot((tx.segment.clone(), tx.region.clone()))
            .insert(tx.customer_id.clone());
    }
    groups
        .into_entries()
        .into_iter()
        .map(|((segment, region), customers)| CustomerDistributionRow {
            segment,
            region,
            customers: customers.len() as u64,
        })
        .collect()
}

/// The `n` (state, city) pairs with the largest sales sums, descending,
/// with sales, profit, distinct orders, and a "City, State" label.
pub fn top_cities(view: &FilteredView, n: usize) -> Vec<CityRow> {
    let mut groups: GroupMap<(String, String), OrderAcc> = GroupMap::new();
    for tx in view.iter() {
        let acc = groups.slot((tx.state.clone(), tx.city.clone()));
        acc.sales += tx.sales;
        acc.profit += tx.profit;
        acc.orders.insert(tx.order_id.clone());
    }
    let rows: Vec<CityRow> = groups
        .into_entries()
        .into_iter()
        .map(|((state, city), acc)| CityRow {
            location: format!("{}, {}", city, state),
            state,
            city,
            sales: acc.sales,
            profit: acc.profit,
            orders: acc.orders.len() as u64,
        })
        .collect();
    top_n(rows, n, |r| r.sales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dataset::{Dataset, SourceFields, Transaction};
    use filter_engine::{apply, FilterCriteria};
    use std::path::PathBuf;
    use std::sync::Arc;

    struct Row<'a> {
        order_id: &'a str,
        date: (i32, u32, u32),
        ship_days: i64,
        region: &'a str,
        state: &'a str,
        city: &'a str,
        segment: &'a str,
        category: &'a str,
        sub_category: &'a str,
        product: &'a str,
        customer: &'a str,
        sales: f64,
        profit: f64,
    }

    impl Default for Row<'_> {
        fn default() -> Self {
            Row {
                order_id: "O-1",
                date: (2023, 1, 5),
                ship_days: 3,
                region: "East",
                state: "New York",
                city: "New York City",
                segment: "Consumer",
                category: "Office Supplies",
                sub_category: "Paper",
                product: "Xerox 225",
                customer: "Aaron Bergman",
                sales: 100.0,
                profit: 20.0,
            }
        }
    }

    fn tx(row: Row<'_>) -> Transaction {
        let order_date =
            NaiveDate::from_ymd_opt(row.date.0, row.date.1, row.date.2).unwrap();
        Transaction::from_source(SourceFields {
            order_id: row.order_id.to_string(),
            order_date,
            ship_date: order_date + chrono::Duration::days(row.ship_days),
            ship_mode: "Standard Class".to_string(),
            customer_id: format!("ID-{}", row.customer),
            customer_name: row.customer.to_string(),
            segment: row.segment.to_string(),
            country: "United States".to_string(),
            city: row.city.to_string(),
            state: row.state.to_string(),
            region: row.region.to_string(),
            product_id: "P-1".to_string(),
            category: row.category.to_string(),
            sub_category: row.sub_category.to_string(),
            product_name: row.product.to_string(),
            sales: row.sales,
            quantity: 1.0,
            discount: 0.0,
            profit: row.profit,
        })
    }

    fn view_over(records: Vec<Transaction>) -> FilteredView {
        let ds = Arc::new(Dataset::new(records, PathBuf::from("test.csv")));
        let criteria = FilterCriteria::matching_all(&ds);
        apply(&ds, &criteria)
    }

    #[test]
    fn metrics_on_worked_example() {
        let view = view_over(vec![
            tx(Row { order_id: "O-1", sales: 100.0, profit: 20.0, ..Row::default() }),
            tx(Row {
                order_id: "O-2",
                region: "West",
                state: "California",
                sales: 200.0,
                profit: 40.0,
                date: (2023, 2, 10),
                ..Row::default()
            }),
            tx(Row {
                order_id: "O-1",
                sales: 50.0,
                profit: 10.0,
                date: (2023, 3, 1),
                ..Row::default()
            }),
        ]);

        let m = metrics(&view);
        assert_eq!(m.total_sales, 350.0);
        assert_eq!(m.total_profit, 70.0);
        // O-1 appears twice but counts once.
        assert_eq!(m.total_orders, 2);
        assert_eq!(m.avg_profit_margin, Some(20.0));
    }

    #[test]
    fn non_finite_margins_are_excluded_from_the_mean() {
        let view = view_over(vec![
            tx(Row { order_id: "O-1", sales: 100.0, profit: 20.0, ..Row::default() }),
            // Sales of zero: margin is non-finite and must not pull the
            // mean toward zero or infinity.
            tx(Row { order_id: "O-2", sales: 0.0, profit: 10.0, ..Row::default() }),
        ]);

        let m = metrics(&view);
        assert_eq!(m.avg_profit_margin, Some(20.0));
    }

    #[test]
    fn all_margins_non_finite_means_undefined() {
        let view = view_over(vec![tx(Row {
            sales: 0.0,
            profit: 10.0,
            ..Row::default()
        })]);
        assert_eq!(metrics(&view).avg_profit_margin, None);
    }

    #[test]
    fn empty_view_yields_empty_tables_and_undefined_means() {
        let view = view_over(vec![]);

        let m = metrics(&view);
        assert_eq!(m.total_sales, 0.0);
        assert_eq!(m.total_orders, 0);
        assert_eq!(m.avg_profit_margin, None);

        assert!(monthly_trend(&view).is_empty());
        assert!(sales_by_category(&view).is_empty());
        assert!(sales_by_region(&view).is_empty());
        assert!(top_states(&view, 10).is_empty());
        assert!(segment_breakdown(&view).is_empty());
        assert!(top_products(&view, 10).is_empty());
        assert!(subcategory_performance(&view).is_empty());
        assert!(shipping_breakdown(&view).is_empty());
        assert!(top_customers(&view, 10).is_empty());
        assert!(customer_distribution(&view).is_empty());
        assert!(top_cities(&view, 15).is_empty());
    }

    #[test]
    fn monthly_trend_is_chronological_with_distinct_orders() {
        let view = view_over(vec![
            tx(Row { order_id: "O-3", date: (2023, 3, 1), sales: 30.0, ..Row::default() }),
            tx(Row { order_id: "O-1", date: (2023, 1, 5), sales: 10.0, ..Row::default() }),
            tx(Row { order_id: "O-1b", date: (2023, 1, 20), sales: 15.0, ..Row::default() }),
        ]);

        let rows = monthly_trend(&view);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period.to_string(), "2023-01");
        assert_eq!(rows[0].sales, 25.0);
        assert_eq!(rows[0].orders, 2);
        assert_eq!(rows[1].period.to_string(), "2023-03");
    }

    #[test]
    fn grouped_by_region_matches_worked_example() {
        let view = view_over(vec![
            tx(Row { sales: 100.0, ..Row::default() }),
            tx(Row { order_id: "O-2", sales: 50.0, date: (2023, 3, 1), ..Row::default() }),
        ]);

        let rows = sales_by_region(&view);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region, "East");
        assert_eq!(rows[0].sales, 150.0);
    }

    #[test]
    fn subcategory_margin_is_none_for_zero_sales() {
        let view = view_over(vec![
            tx(Row { sub_category: "Paper", sales: 100.0, profit: 25.0, ..Row::default() }),
            tx(Row { sub_category: "Binders", sales: 0.0, profit: 10.0, ..Row::default() }),
        ]);

        let rows = subcategory_performance(&view);
        let paper = rows.iter().find(|r| r.sub_category == "Paper").unwrap();
        let binders = rows.iter().find(|r| r.sub_category == "Binders").unwrap();

        assert_eq!(paper.profit_margin, Some(25.0));
        assert_eq!(binders.profit_margin, None);
    }

    #[test]
    fn shipping_breakdown_averages_whole_days() {
        let view = view_over(vec![
            tx(Row { order_id: "O-1", ship_days: 2, ..Row::default() }),
            tx(Row { order_id: "O-2", ship_days: 4, ..Row::default() }),
            // Negative interval: aggregated, surfaced via warning.
            tx(Row { order_id: "O-3", ship_days: -1, ..Row::default() }),
        ]);

        let rows = shipping_breakdown(&view);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].orders, 3);
        let avg = rows[0].avg_shipping_days.unwrap();
        assert!((avg - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn customer_distribution_counts_distinct_customers() {
        let view = view_over(vec![
            tx(Row { customer: "Alice", ..Row::default() }),
            tx(Row { customer: "Alice", order_id: "O-2", ..Row::default() }),
            tx(Row { customer: "Bob", order_id: "O-3", ..Row::default() }),
            tx(Row {
                customer: "Cara",
                segment: "Corporate",
                order_id: "O-4",
                ..Row::default()
            }),
        ]);

        let rows = customer_distribution(&view);
        assert_eq!(rows.len(), 2);
        let consumer = rows
            .iter()
            .find(|r| r.segment == "Consumer" && r.region == "East")
            .unwrap();
        assert_eq!(consumer.customers, 2);
    }

    #[test]
    fn top_cities_ranks_by_sales_and_labels_locations() {
        let view = view_over(vec![
            tx(Row { city: "Seattle", state: "Washington", sales: 10.0, ..Row::default() }),
            tx(Row {
                city: "Spokane",
                state: "Washington",
                sales: 90.0,
                order_id: "O-2",
                ..Row::default()
            }),
        ]);

        let rows = top_cities(&view, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location, "Spokane, Washington");
        assert_eq!(rows[0].sales, 90.0);
    }
}
