//! FILENAME: dataset/src/loader.rs
//! CSV loading with encoding fallback.
//!
//! The load pipeline is:
//! 1. Read the raw bytes once.
//! 2. Decode as UTF-8; on any decode error retry once as Latin-1.
//! 3. Stream-deserialize rows with the `csv` crate.
//! 4. Parse both date columns with the explicit day/month/year format;
//!    a mismatch is fatal with a diagnostic naming column, value, line.
//! 5. Build `Transaction` records, computing derived fields.
//!
//! The loader is pure given the same file content, which is what makes
//! the memoized `DatasetCache` sound.

use crate::error::LoadError;
use crate::record::{Dataset, SourceFields, Transaction};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Explicit day/month/year date format of the input file.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

// ============================================================================
// RAW ROW
// ============================================================================

/// One CSV row as it appears in the file, before date parsing and
/// derivation. Column names are the fixed header contract; columns not
/// listed here (e.g. "Row ID", "Postal Code") are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Order ID")]
    order_id: String,
    #[serde(rename = "Order Date")]
    order_date: String,
    #[serde(rename = "Ship Date")]
    ship_date: String,
    #[serde(rename = "Ship Mode")]
    ship_mode: String,
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Segment")]
    segment: String,
    #[serde(rename = "Country", default)]
    country: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Product ID", default)]
    product_id: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Sub-Category")]
    sub_category: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Sales")]
    sales: f64,
    #[serde(rename = "Quantity")]
    quantity: f64,
    #[serde(rename = "Discount")]
    discount: f64,
    #[serde(rename = "Profit")]
    profit: f64,
}

// ============================================================================
// DECODING
// ============================================================================

/// Decodes file bytes, trying UTF-8 first and falling back to Latin-1.
/// Latin-1 maps every byte to the Unicode scalar of the same value, so the
/// fallback is total; the recovery is logged because it usually means the
/// file was exported by a legacy tool.
fn decode(bytes: &[u8], path: &Path) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            log::warn!(
                "{}: not valid UTF-8, falling back to Latin-1",
                path.display()
            );
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Loads the dataset from a delimited file.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let bytes = fs::read(path)?;
    parse_dataset(&bytes, path)
}

/// Parses already-read file bytes into a dataset. Split out from
/// `load_dataset` so the cache can hash and parse one read of the file.
pub fn parse_dataset(bytes: &[u8], path: &Path) -> Result<Dataset, LoadError> {
    let text = decode(bytes, path);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<RawRow>().enumerate() {
        // 1-based data line, not counting the header.
        let line = (i + 1) as u64;
        let row = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(build_record(row, path, line)?);
    }

    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(Dataset::new(records, path.to_path_buf()))
}

fn build_record(row: RawRow, path: &Path, line: u64) -> Result<Transaction, LoadError> {
    let order_date = parse_date(&row.order_date, "Order Date", path, line)?;
    let ship_date = parse_date(&row.ship_date, "Ship Date", path, line)?;

    Ok(Transaction::from_source(SourceFields {
        order_id: row.order_id,
        order_date,
        ship_date,
        ship_mode: row.ship_mode,
        customer_id: row.customer_id,
        customer_name: row.customer_name,
        segment: row.segment,
        country: row.country,
        city: row.city,
        state: row.state,
        region: row.region,
        product_id: row.product_id,
        category: row.category,
        sub_category: row.sub_category,
        product_name: row.product_name,
        sales: row.sales,
        quantity: row.quantity,
        discount: row.discount,
        profit: row.profit,
    }))
}

/// Parses one date cell. No partial or best-effort parsing: a value that
/// does not match `DATE_FORMAT` fails the whole load.
fn parse_date(
    value: &str,
    column: &'static str,
    path: &Path,
    line: u64,
) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| LoadError::Date {
        path: path.to_path_buf(),
        column,
        value: value.to_string(),
        line,
    })
}
