//! Integration tests that load the shipped CSV tables from disk.

use std::fs::File;
use std::path::{Path, PathBuf};

use isr_core::{PayPeriod, tables};
use isr_data::{BracketTableLoader, BracketTableLoaderError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const TEST_CSV_2025: &str = include_str!("../test-data/isr_brackets_2025.csv");

fn test_data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join(name)
}

#[test]
fn test_parse_all_2025_records() {
    let records = BracketTableLoader::parse(TEST_CSV_2025.as_bytes()).expect("Failed to parse CSV");

    // 11 monthly + 11 annual
    assert_eq!(records.len(), 22);
}

#[test]
fn test_csv_tables_match_builtin_tables() {
    let records = BracketTableLoader::parse(TEST_CSV_2025.as_bytes()).unwrap();

    let loaded = BracketTableLoader::build(&records).expect("Failed to build tables");

    assert_eq!(loaded[&PayPeriod::Monthly], tables::monthly_2025());
    assert_eq!(loaded[&PayPeriod::Annual], tables::annual_2025());
}

#[test]
fn test_load_table_from_file() {
    let file = File::open(test_data("isr_brackets_2025.csv")).expect("fixture should exist");

    let table = BracketTableLoader::load_table(file, PayPeriod::Monthly).expect("should load");

    assert_eq!(table.period(), PayPeriod::Monthly);
    assert_eq!(table.brackets()[2].lower_bound, dec!(7168.52));
    assert_eq!(table.brackets()[2].base_amount, dec!(420.95));
    assert_eq!(table.brackets()[2].marginal_rate_percent, dec!(10.88));
}

#[test]
fn test_load_table_with_gap_fails() {
    let file = File::open(test_data("gap_brackets.csv")).expect("fixture should exist");

    let result = BracketTableLoader::load_table(file, PayPeriod::Monthly);

    let err = result.expect_err("gap should be rejected");
    assert!(matches!(err, BracketTableLoaderError::InvalidTable { .. }));
    assert!(err.to_string().starts_with("Invalid monthly table"));
}
