//! FILENAME: export-format/src/stats.rs
//! Descriptive statistics of the filtered view.
//!
//! One column per numeric field, one row per statistic: count, mean, std
//! (sample, n-1), min, 25%, 50%, 75% (linear-interpolation percentiles),
//! max. Non-finite values (the zero-sales margins) are excluded from a
//! field's statistics and from its count, so a division-by-zero upstream
//! can never leak into a mean here.

use crate::error::ExportError;
use filter_engine::FilteredView;
use serde::Serialize;
use std::io::Write;

/// The numeric fields covered by the summary, in column order.
const FIELDS: [&str; 8] = [
    "Sales",
    "Quantity",
    "Discount",
    "Profit",
    "Year",
    "Month",
    "Profit Margin",
    "Shipping Days",
];

const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Descriptive statistics for one numeric field. All values except
/// `count` are `None` when no finite value exists; `std` additionally
/// needs at least two values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStats {
    pub name: &'static str,
    pub count: u64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Percentile of an ascending-sorted non-empty slice, with linear
/// interpolation between adjacent ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = p * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let weight = rank - lo as f64;
    sorted[lo] * (1.0 - weight) + sorted[hi] * weight
}

fn field_stats(name: &'static str, mut values: Vec<f64>) -> FieldStats {
    values.retain(|v| v.is_finite());
    values.sort_by(|a, b| a.total_cmp(b));

    let n = values.len();
    if n == 0 {
        return FieldStats {
            name,
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        Some((ss / (n - 1) as f64).sqrt())
    } else {
        None
    };

    FieldStats {
        name,
        count: n as u64,
        mean: Some(mean),
        std,
        min: Some(values[0]),
        q25: Some(percentile(&values, 0.25)),
        median: Some(percentile(&values, 0.50)),
        q75: Some(percentile(&values, 0.75)),
        max: Some(values[n - 1]),
    }
}

/// Statistics for every numeric field of the view.
pub fn describe(view: &FilteredView) -> Vec<FieldStats> {
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(view.len()); FIELDS.len()];
    for tx in view.iter() {
        columns[0].push(tx.sales);
        columns[1].push(tx.quantity);
        columns[2].push(tx.discount);
        columns[3].push(tx.profit);
        columns[4].push(tx.year as f64);
        columns[5].push(tx.month as f64);
        columns[6].push(tx.profit_margin);
        columns[7].push(tx.shipping_days() as f64);
    }

    FIELDS
        .iter()
        .zip(columns)
        .map(|(&name, values)| field_stats(name, values))
        .collect()
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes the statistics table as CSV: one row per statistic, one column
/// per field, first column naming the statistic.
pub fn write_summary_stats<W: Write>(view: &FilteredView, out: W) -> Result<(), ExportError> {
    let stats = describe(view);
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["Statistic"];
    header.extend(FIELDS);
    writer.write_record(header)?;

    for statistic in STATISTICS {
        let mut row = vec![statistic.to_string()];
        for s in &stats {
            row.push(match statistic {
                "count" => s.count.to_string(),
                "mean" => cell(s.mean),
                "std" => cell(s.std),
                "min" => cell(s.min),
                "25%" => cell(s.q25),
                "50%" => cell(s.median),
                "75%" => cell(s.q75),
                "max" => cell(s.max),
                _ => unreachable!("unknown statistic row"),
            });
        }
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// The statistics table as an in-memory CSV payload.
pub fn summary_stats_to_string(view: &FilteredView) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_summary_stats(view, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
