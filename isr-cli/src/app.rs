use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use isr_core::{
    BracketTable, CalculationInputs, IsrCalculation, IsrEngine, IsrError, PayPeriod, tables,
};
use isr_data::BracketTableLoader;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::csv_loader::BatchRow;
use crate::presentation::{History, PaySplit, render_summary, write_report};
use crate::utils::parse_decimal;

/// Raw values typed by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct InputForm {
    pub gross_pay: String,
    pub manual_deductions: String,
    pub apply_contribution: bool,
    /// Days worked in the month; gross pay is then the monthly salary.
    /// Only valid for the monthly pay period.
    pub days_worked: Option<u32>,
}

impl InputForm {
    /// Parse the form into engine inputs for `period`, collecting every
    /// problem found.
    pub fn validate(
        &self,
        period: PayPeriod,
    ) -> Result<CalculationInputs, Vec<String>> {
        let mut errors = Vec::new();

        if self.days_worked.is_some() && period != PayPeriod::Monthly {
            errors.push(format!(
                "Days worked only apply to a monthly salary, not the {period} period"
            ));
        }

        let gross_pay = self.parse_amount("Gross pay", &self.gross_pay, true, &mut errors);
        let manual_deductions =
            self.parse_amount("Manual deductions", &self.manual_deductions, false, &mut errors);

        if let (Some(gross), Some(deductions)) = (gross_pay, manual_deductions) {
            if gross <= Decimal::ZERO {
                errors.push("Gross pay must be greater than zero".to_string());
            } else if deductions < Decimal::ZERO {
                errors.push("Manual deductions cannot be negative".to_string());
            } else if self.days_worked.is_none() && deductions >= gross {
                errors.push("Manual deductions must be less than gross pay".to_string());
            }
        }

        let (Some(gross_pay), Some(manual_deductions)) = (gross_pay, manual_deductions) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let inputs = match self.days_worked {
            Some(days) => {
                CalculationInputs::prorated(gross_pay, days).map_err(|e| vec![e.to_string()])?
            }
            None => CalculationInputs::new(gross_pay),
        };

        Ok(inputs
            .with_deductions(manual_deductions)
            .with_contribution(self.apply_contribution))
    }

    fn parse_amount(
        &self,
        field: &str,
        value: &str,
        required: bool,
        errors: &mut Vec<String>,
    ) -> Option<Decimal> {
        if required && value.trim().is_empty() {
            errors.push(format!("{field} is required"));
            return None;
        }
        match parse_decimal(value) {
            Ok(v) => Some(v),
            Err(_) => {
                errors.push(format!("{field} must be a valid number"));
                None
            }
        }
    }
}

/// Everything produced for one calculation.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub calculation: IsrCalculation,
    pub history_id: u64,
    pub summary: String,
    /// Present for tiers entitled to the chart.
    pub chart: Option<PaySplit>,
    /// Present for tiers entitled to a report.
    pub report_path: Option<PathBuf>,
    pub notice: Option<&'static str>,
}

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// History ids of the rows that were calculated.
    pub recorded: Vec<u64>,
    /// Rows that failed validation, by data row number.
    pub rejected: Vec<(usize, IsrError)>,
}

/// Application state for one run of the command-line tool.
pub struct Session {
    config: AppConfig,
    table: BracketTable,
    history: History,
}

/// Loads the bracket table named by `config`, or the built-in one.
pub fn load_table(config: &AppConfig) -> Result<BracketTable> {
    let Some(path) = &config.table_file else {
        debug!(period = %config.period, "using built-in bracket table");
        return Ok(tables::builtin(config.period));
    };

    let file = File::open(path)
        .with_context(|| format!("cannot open bracket table '{}'", path.display()))?;
    let table = BracketTableLoader::load_table(file, config.period)
        .with_context(|| format!("invalid bracket table '{}'", path.display()))?;
    info!(path = %path.display(), brackets = table.len(), "loaded bracket table");
    Ok(table)
}

impl Session {
    pub fn new(config: AppConfig) -> Result<Self> {
        let table = load_table(&config)?;
        Ok(Self::with_table(config, table))
    }

    pub fn with_table(
        config: AppConfig,
        table: BracketTable,
    ) -> Self {
        Self {
            config,
            table,
            history: History::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn table(&self) -> &BracketTable {
        &self.table
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn engine(&self) -> Result<IsrEngine<'_>, IsrError> {
        IsrEngine::with_config(&self.table, self.config.engine_config())
    }

    /// Runs the engine and feeds the result to every sink the tier allows.
    pub fn calculate(
        &mut self,
        inputs: &CalculationInputs,
        now: DateTime<Local>,
    ) -> Result<Outcome> {
        let calculation = self.engine()?.calculate(inputs)?;
        let tier = self.config.tier;

        let summary = render_summary(&calculation);
        let chart = tier
            .can_chart()
            .then(|| PaySplit::from_calculation(&calculation));
        let report_path = match tier.report_style() {
            Some(_) => Some(
                write_report(&self.config.report_dir, &calculation, tier, now)
                    .context("failed to write report")?,
            ),
            None => None,
        };
        // Only a fully presented calculation is remembered.
        let history_id = self.history.record(&calculation, now);

        Ok(Outcome {
            calculation,
            history_id,
            summary,
            chart,
            report_path,
            notice: tier.upgrade_notice(),
        })
    }

    /// Calculates every row, recording successes in the history.
    ///
    /// A configuration problem stops the batch; a bad row is skipped.
    pub fn run_batch(
        &mut self,
        rows: &[BatchRow],
        now: DateTime<Local>,
    ) -> Result<BatchSummary> {
        let engine = IsrEngine::with_config(&self.table, self.config.engine_config())?;
        let mut summary = BatchSummary::default();

        for row in rows {
            match engine.calculate(&row.inputs) {
                Ok(calculation) => {
                    let id = self.history.record(&calculation, now);
                    summary.recorded.push(id);
                }
                Err(error) if error.is_invalid_input() => {
                    warn!(row = row.row, %error, "skipping row");
                    summary.rejected.push((row.row, error));
                }
                Err(error) => return Err(error.into()),
            }
        }

        info!(
            recorded = summary.recorded.len(),
            rejected = summary.rejected.len(),
            "batch finished"
        );
        Ok(summary)
    }
}
