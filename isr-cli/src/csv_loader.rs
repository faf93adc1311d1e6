//! CSV import for batch calculations.
//!
//! Expected columns (header row required, order does not matter):
//!
//! | Column             | Required | Notes |
//! |--------------------|----------|-------|
//! | gross_pay          | yes      | amount, thousands separators allowed when quoted |
//! | manual_deductions  | no       | empty or missing is 0 |
//! | apply_contribution | no       | true/false, yes/no, si/no, 1/0; empty or missing is false |

use std::path::{Path, PathBuf};

use isr_core::CalculationInputs;
use serde::Deserialize;
use thiserror::Error;

use crate::utils::{ParseDecimalError, ParseFlagError, parse_decimal, parse_flag};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CsvLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("row {row}: invalid {column}: {source}")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        #[source]
        source: ParseDecimalError,
    },

    #[error("row {row}: invalid apply_contribution: {source}")]
    InvalidFlag {
        row: usize,
        #[source]
        source: ParseFlagError,
    },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// Raw CSV row; amounts stay text so they can carry separators.
#[derive(Debug, Deserialize)]
struct CsvRow {
    gross_pay: String,
    #[serde(default)]
    manual_deductions: Option<String>,
    #[serde(default)]
    apply_contribution: Option<String>,
}

/// Inputs read from one data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRow {
    /// 1-based data row number, header excluded.
    pub row: usize,
    pub inputs: CalculationInputs,
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchRow, CsvLoadError> {
    let amount = |column: &'static str, value: &str| {
        parse_decimal(value).map_err(|source| CsvLoadError::InvalidAmount {
            row: row_number,
            column,
            source,
        })
    };

    let gross_pay = amount("gross_pay", &row.gross_pay)?;
    let manual_deductions = amount(
        "manual_deductions",
        row.manual_deductions.as_deref().unwrap_or(""),
    )?;
    let apply_contribution = parse_flag(row.apply_contribution.as_deref().unwrap_or(""))
        .map_err(|source| CsvLoadError::InvalidFlag {
            row: row_number,
            source,
        })?;

    Ok(BatchRow {
        row: row_number,
        inputs: CalculationInputs::new(gross_pay)
            .with_deductions(manual_deductions)
            .with_contribution(apply_contribution),
    })
}

/// Parse CSV text and return one [`BatchRow`] per data row, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] if the CSV is structurally invalid or lacks the
///   `gross_pay` column.
/// * [CsvLoadError::InvalidAmount] / [CsvLoadError::InvalidFlag] for a value
///   that cannot be read; the error names the row.
pub fn load_from_str(input: &str) -> Result<Vec<BatchRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    // -----------------------------------------------------------------------
    // 1. Only the required column
    // -----------------------------------------------------------------------
    #[test]
    fn test_gross_only_defaults_the_rest() {
        let rows = load_from_str("gross_pay\n10000.00\n").expect("should parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[0].inputs, CalculationInputs::new(dec!(10000.00)));
    }

    // -----------------------------------------------------------------------
    // 2. Every column populated
    // -----------------------------------------------------------------------
    #[test]
    fn test_all_columns() {
        let csv = "\
gross_pay,manual_deductions,apply_contribution
25000.00,1500.50,true
";
        let rows = load_from_str(csv).expect("should parse");

        let inputs = rows[0].inputs;
        assert_eq!(inputs.gross_pay, dec!(25000.00));
        assert_eq!(inputs.manual_deductions, dec!(1500.50));
        assert!(inputs.apply_contribution);
    }

    // -----------------------------------------------------------------------
    // 3. Empty optional values
    // -----------------------------------------------------------------------
    #[test]
    fn test_empty_optional_values_default() {
        let csv = "\
gross_pay,manual_deductions,apply_contribution
8364.50,,
";
        let rows = load_from_str(csv).expect("should parse");

        assert_eq!(rows[0].inputs.manual_deductions, Decimal::ZERO);
        assert!(!rows[0].inputs.apply_contribution);
    }

    // -----------------------------------------------------------------------
    // 4. Quoted amounts with thousands separators
    // -----------------------------------------------------------------------
    #[test]
    fn test_quoted_amount_with_separator() {
        let csv = "gross_pay,apply_contribution\n\"45,678.90\",si\n";
        let rows = load_from_str(csv).expect("should parse");

        assert_eq!(rows[0].inputs.gross_pay, dec!(45678.90));
        assert!(rows[0].inputs.apply_contribution);
    }

    // -----------------------------------------------------------------------
    // 5. Row numbers in errors
    // -----------------------------------------------------------------------
    #[test]
    fn test_bad_amount_reports_row_and_column() {
        let csv = "\
gross_pay,manual_deductions
10000,0
20000,lots
";
        let err = load_from_str(csv).unwrap_err();

        match err {
            CsvLoadError::InvalidAmount { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "manual_deductions");
            }
            other => panic!("expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_flag_reports_row() {
        let csv = "gross_pay,apply_contribution\n10000,maybe\n";
        let err = load_from_str(csv).unwrap_err();

        match err {
            CsvLoadError::InvalidFlag { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(source, ParseFlagError("maybe".to_string()));
            }
            other => panic!("expected InvalidFlag, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 6. Structural errors
    // -----------------------------------------------------------------------
    #[test]
    fn test_missing_gross_column_is_parse_error() {
        let err = load_from_str("manual_deductions\n100\n").unwrap_err();

        assert!(matches!(err, CsvLoadError::Parse(_)));
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let rows = load_from_str("gross_pay,manual_deductions\n").expect("header-only is valid");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_from_file(Path::new("no/such/inputs.csv")).unwrap_err();
        assert!(matches!(err, CsvLoadError::Io { .. }));
    }

    // -----------------------------------------------------------------------
    // 7. Column order and whitespace
    // -----------------------------------------------------------------------
    #[test]
    fn test_column_order_and_whitespace() {
        let csv = "\
apply_contribution , gross_pay
 yes , 12000
";
        let rows = load_from_str(csv).expect("should parse");

        assert_eq!(rows[0].inputs.gross_pay, dec!(12000));
        assert!(rows[0].inputs.apply_contribution);
    }
}
