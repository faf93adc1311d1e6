use std::collections::BTreeMap;
use std::io::Read;

use isr_core::{BracketTable, PayPeriod, TableError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading bracket table data.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid period '{period}' on row {row}")]
    InvalidPeriod { period: String, row: usize },

    #[error("Invalid {period} table: {source}")]
    InvalidTable {
        period: PayPeriod,
        #[source]
        source: TableError,
    },

    #[error("No {0} brackets found in the file")]
    MissingPeriod(PayPeriod),
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket table CSV file.
///
/// - `period`: `monthly` or `annual`
/// - `lower_bound`: inclusive floor of the bracket
/// - `upper_bound`: inclusive ceiling (empty for the unbounded top bracket)
/// - `base_amount`: fixed tax owed below the floor
/// - `rate_percent`: marginal rate in percent (e.g. 10.88)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub period: String,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub base_amount: Decimal,
    pub rate_percent: Decimal,
}

impl BracketRecord {
    fn to_bracket(&self) -> TaxBracket {
        TaxBracket::new(
            self.lower_bound,
            self.upper_bound.unwrap_or(Decimal::MAX),
            self.base_amount,
            self.rate_percent,
        )
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables stored as CSV.
///
/// One file may hold tables for several pay periods; rows are grouped by
/// their `period` column and keep their file order inside each group.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by period and validate each resulting table.
    pub fn build(
        records: &[BracketRecord]
    ) -> Result<BTreeMap<PayPeriod, BracketTable>, BracketTableLoaderError> {
        let mut groups: BTreeMap<PayPeriod, Vec<TaxBracket>> = BTreeMap::new();

        for (index, record) in records.iter().enumerate() {
            let period = PayPeriod::parse(&record.period).ok_or_else(|| {
                BracketTableLoaderError::InvalidPeriod {
                    period: record.period.clone(),
                    row: index + 1,
                }
            })?;
            groups.entry(period).or_default().push(record.to_bracket());
        }

        let mut tables = BTreeMap::new();
        for (period, brackets) in groups {
            debug!(%period, brackets = brackets.len(), "validating bracket table");
            let table = BracketTable::new(period, brackets)
                .map_err(|source| BracketTableLoaderError::InvalidTable { period, source })?;
            tables.insert(period, table);
        }

        Ok(tables)
    }

    /// Parse a CSV reader and return the table for one period.
    pub fn load_table<R: Read>(
        reader: R,
        period: PayPeriod,
    ) -> Result<BracketTable, BracketTableLoaderError> {
        let records = Self::parse(reader)?;
        let mut tables = Self::build(&records)?;

        tables
            .remove(&period)
            .ok_or(BracketTableLoaderError::MissingPeriod(period))
    }
}
