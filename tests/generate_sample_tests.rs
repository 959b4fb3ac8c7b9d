use std::fs::File;

use assert_cmd::cargo::cargo_bin_cmd;
use launch_dash::data::loader::load_file;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::TempDir;

#[test]
fn test_generated_files_share_columns_and_load() {
    let dir = TempDir::new().unwrap();
    cargo_bin_cmd!("generate_sample")
        .current_dir(dir.path())
        .assert()
        .success();

    let csv = dir.path().join("spacex_launch_dash.csv");
    let parquet = dir.path().join("spacex_launch_dash.parquet");

    let header = std::fs::read_to_string(&csv).unwrap();
    assert!(header.starts_with(",Flight Number,Launch Site,class"));

    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&parquet).unwrap()).unwrap();
    let names: Vec<&str> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Unnamed: 0",
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version Category",
        ]
    );

    let from_csv = load_file(&csv).unwrap();
    let from_parquet = load_file(&parquet).unwrap();
    assert_eq!(from_csv.len(), 56);
    assert_eq!(from_csv.records(), from_parquet.records());
}
