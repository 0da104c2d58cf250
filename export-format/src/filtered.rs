//! FILENAME: export-format/src/filtered.rs
//! Serialization of the filtered view.
//!
//! The payload carries the input columns in their contract order followed
//! by the derived columns. Dates are rendered with the loader's
//! day/month/year format, so exporting a view and re-loading the file
//! yields the same rows (the round-trip property); the loader simply
//! ignores the derived columns.

use crate::error::ExportError;
use dataset::{Transaction, DATE_FORMAT};
use filter_engine::FilteredView;
use std::io::Write;

/// Column order of the payload. Input columns first, derived last.
const COLUMNS: [&str; 24] = [
    "Order ID",
    "Order Date",
    "Ship Date",
    "Ship Mode",
    "Customer ID",
    "Customer Name",
    "Segment",
    "Country",
    "City",
    "State",
    "Region",
    "Product ID",
    "Category",
    "Sub-Category",
    "Product Name",
    "Sales",
    "Quantity",
    "Discount",
    "Profit",
    "Year",
    "Month",
    "Month-Year",
    "Profit Margin",
    "Shipping Days",
];

fn record_cells(tx: &Transaction) -> Vec<String> {
    vec![
        tx.order_id.clone(),
        tx.order_date.format(DATE_FORMAT).to_string(),
        tx.ship_date.format(DATE_FORMAT).to_string(),
        tx.ship_mode.clone(),
        tx.customer_id.clone(),
        tx.customer_name.clone(),
        tx.segment.clone(),
        tx.country.clone(),
        tx.city.clone(),
        tx.state.clone(),
        tx.region.clone(),
        tx.product_id.clone(),
        tx.category.clone(),
        tx.sub_category.clone(),
        tx.product_name.clone(),
        tx.sales.to_string(),
        tx.quantity.to_string(),
        tx.discount.to_string(),
        tx.profit.to_string(),
        tx.year.to_string(),
        tx.month.to_string(),
        tx.period.to_string(),
        tx.profit_margin.to_string(),
        tx.shipping_days().to_string(),
    ]
}

/// Writes the view as CSV to `out`.
pub fn write_filtered<W: Write>(view: &FilteredView, out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(COLUMNS)?;
    for tx in view.iter() {
        writer.write_record(record_cells(tx))?;
    }
    writer.flush()?;
    Ok(())
}

/// The view as an in-memory CSV payload (the download-button case).
pub fn filtered_to_string(view: &FilteredView) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_filtered(view, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
