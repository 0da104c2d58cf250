//! FILENAME: export-format/src/aggregate.rs
//! The three-key aggregated export.
//!
//! Groups the view by (category, sub-category, region) and reduces sales,
//! profit, and quantity by sum plus a distinct order count. Group order is
//! first-encounter order, like every other summary.

use crate::error::ExportError;
use filter_engine::FilteredView;
use rustc_hash::FxHashSet;
use std::io::Write;
use summary_engine::group::GroupMap;

const COLUMNS: [&str; 7] = [
    "Category",
    "Sub-Category",
    "Region",
    "Sales",
    "Profit",
    "Quantity",
    "Order Count",
];

#[derive(Default)]
struct Acc {
    sales: f64,
    profit: f64,
    quantity: f64,
    orders: FxHashSet<String>,
}

/// Writes the aggregate table as CSV to `out`.
pub fn write_aggregate<W: Write>(view: &FilteredView, out: W) -> Result<(), ExportError> {
    let mut groups: GroupMap<(String, String, String), Acc> = GroupMap::new();
    for tx in view.iter() {
        let acc = groups.slot((
            tx.category.clone(),
            tx.sub_category.clone(),
            tx.region.clone(),
        ));
        acc.sales += tx.sales;
        acc.profit += tx.profit;
        acc.quantity += tx.quantity;
        acc.orders.insert(tx.order_id.clone());
    }

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(COLUMNS)?;
    for ((category, sub_category, region), acc) in groups.into_entries() {
        writer.write_record([
            category,
            sub_category,
            region,
            acc.sales.to_string(),
            acc.profit.to_string(),
            acc.quantity.to_string(),
            acc.orders.len().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// The aggregate table as an in-memory CSV payload.
pub fn aggregate_to_string(view: &FilteredView) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_aggregate(view, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
