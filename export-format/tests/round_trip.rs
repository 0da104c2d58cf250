//! FILENAME: export-format/tests/round_trip.rs
//! Exported payloads must re-parse with the dataset loader.

use chrono::NaiveDate;
use dataset::{load_dataset, Dataset, SourceFields, Transaction};
use export_format::write_filtered;
use filter_engine::{apply, FilterCriteria};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

fn tx(order: &str, region: &str, sales: f64, d: (i32, u32, u32)) -> Transaction {
    let order_date = NaiveDate::from_ymd_opt(d.0, d.1, d.2).unwrap();
    Transaction::from_source(SourceFields {
        order_id: order.to_string(),
        order_date,
        ship_date: order_date + chrono::Duration::days(3),
        ship_mode: "Second Class".to_string(),
        customer_id: "AB-1".to_string(),
        customer_name: "Aaron Bergman".to_string(),
        segment: "Consumer".to_string(),
        country: "United States".to_string(),
        city: "Seattle".to_string(),
        state: "Washington".to_string(),
        region: region.to_string(),
        product_id: "OFF-PA-1".to_string(),
        category: "Office Supplies".to_string(),
        sub_category: "Paper".to_string(),
        product_name: "Xerox 225, 8.5 x 11\"".to_string(),
        sales,
        quantity: 3.0,
        discount: 0.2,
        profit: sales * 0.17,
    })
}

#[test]
fn filtered_export_reloads_with_same_rows_and_sales() {
    let ds = Arc::new(Dataset::new(
        vec![
            tx("US-1", "West", 261.96, (2023, 1, 5)),
            tx("US-2", "East", 14.62, (2023, 2, 10)),
            tx("US-3", "West", 957.5775, (2023, 3, 1)),
        ],
        PathBuf::from("source.csv"),
    ));
    let criteria = FilterCriteria::matching_all(&ds).with_regions(["West"]);
    let view = apply(&ds, &criteria);
    assert_eq!(view.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    write_filtered(&view, File::create(&path).unwrap()).unwrap();

    let reloaded = load_dataset(&path).unwrap();
    assert_eq!(reloaded.len(), view.len());

    let exported_sales: f64 = view.iter().map(|t| t.sales).sum();
    let reloaded_sales: f64 = reloaded.iter().map(|t| t.sales).sum();
    assert!((exported_sales - reloaded_sales).abs() < 1e-9);

    // Field-level spot checks, including the quoted product name.
    assert_eq!(reloaded.records[0].order_id, "US-1");
    assert_eq!(reloaded.records[0].order_date, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
    assert_eq!(reloaded.records[0].product_name, "Xerox 225, 8.5 x 11\"");
}
