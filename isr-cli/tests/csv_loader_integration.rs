//! Integration tests that exercise the loader against an on-disk fixture file.
//!
//! These complement the unit tests inside csv_loader.rs (which all use
//! inline string literals) by verifying that the full read-from-disk path
//! works end-to-end.

use std::path::{Path, PathBuf};

use isr_cli::csv_loader;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Path to the sample CSV shipped with the test fixtures.
fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_inputs.csv")
}

#[test]
fn test_load_fixture_file_succeeds() {
    let rows =
        csv_loader::load_from_file(&fixture_path()).expect("fixture file should load without error");

    // The loader does not judge amounts; the engine rejects rows 4 and 5 later.
    assert_eq!(rows.len(), 5);
}

#[test]
fn test_load_fixture_row_numbers_follow_file_order() {
    let rows = csv_loader::load_from_file(&fixture_path()).unwrap();

    let numbers: Vec<_> = rows.iter().map(|r| r.row).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_load_fixture_first_row_defaults() {
    let rows = csv_loader::load_from_file(&fixture_path()).unwrap();
    let inputs = rows[0].inputs;

    assert_eq!(inputs.gross_pay, dec!(10000.00));
    assert_eq!(inputs.manual_deductions, Decimal::ZERO);
    assert!(!inputs.apply_contribution);
}

#[test]
fn test_load_fixture_second_row_quoted_amount() {
    let rows = csv_loader::load_from_file(&fixture_path()).unwrap();
    let inputs = rows[1].inputs;

    assert_eq!(inputs.gross_pay, dec!(25000.00));
    assert_eq!(inputs.manual_deductions, dec!(1500.00));
    assert!(inputs.apply_contribution);
}

#[test]
fn test_load_fixture_third_row_yes_flag() {
    let rows = csv_loader::load_from_file(&fixture_path()).unwrap();

    assert_eq!(rows[2].inputs.gross_pay, dec!(8364.50));
    assert!(rows[2].inputs.apply_contribution);
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let bad_path = Path::new("/this/path/does/not/exist.csv");
    let result = csv_loader::load_from_file(bad_path);
    assert!(result.is_err());
}
