//! ISR withholding engine.
//!
//! # Pipeline
//!
//! | Stage | Description |
//! |-------|-------------|
//! | 1 | IMSS contribution: gross pay × contribution rate, when withheld |
//! | 2 | Taxable income: gross pay − manual deductions − contribution |
//! | 3 | Bracket: first bracket whose upper bound is at or above taxable income |
//! | 4 | Excess: taxable income − bracket lower bound, never below zero |
//! | 5 | Marginal tax: excess × marginal rate / 100 |
//! | 6 | Tax: marginal tax + bracket base amount |
//! | 7 | Subsidy: fixed credit off the tax below the ceiling, floored at zero (optional) |
//! | 8 | Net pay: gross pay − tax − contribution − manual deductions |
//!
//! Every stage is a plain function of its inputs. Out-of-domain values are
//! reported as [`IsrError`]s before the next stage runs.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use isr_core::{CalculationInputs, IsrEngine, tables};
//!
//! let table = tables::monthly_2025();
//! let engine = IsrEngine::new(&table);
//!
//! let result = engine.calculate(&CalculationInputs::new(dec!(10000.00))).unwrap();
//!
//! assert_eq!(result.breakdown.bracket_lower_bound, dec!(7168.52));
//! assert_eq!(result.breakdown.excess_amount, dec!(2831.48));
//! assert_eq!(result.net_pay.rounded, dec!(9270.98));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{apply_percent, floor_at_zero, round_half_up};
use crate::calculations::subsidy::EmploymentSubsidy;
use crate::error::IsrError;
use crate::models::{BracketTable, CalculationInputs, IsrCalculation, NetPay, TaxBracket, TaxBreakdown};

/// Worker IMSS contribution rate (0.625 % of gross pay).
pub const IMSS_WORKER_RATE: Decimal = dec!(0.00625);

/// Tunable parameters of the engine.
///
/// The defaults withhold IMSS at [`IMSS_WORKER_RATE`] and do not apply the
/// employment subsidy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fraction of gross pay withheld as IMSS contribution when requested.
    pub contribution_rate: Decimal,

    /// Employment subsidy to apply after the bracket lookup, if any.
    pub subsidy: Option<EmploymentSubsidy>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            contribution_rate: IMSS_WORKER_RATE,
            subsidy: None,
        }
    }
}

impl EngineConfig {
    pub fn with_subsidy(
        mut self,
        subsidy: EmploymentSubsidy,
    ) -> Self {
        self.subsidy = Some(subsidy);
        self
    }

    pub fn with_contribution_rate(
        mut self,
        contribution_rate: Decimal,
    ) -> Self {
        self.contribution_rate = contribution_rate;
        self
    }

    /// Checks that every value is inside its valid range.
    ///
    /// # Errors
    ///
    /// - [`IsrError::InvalidContributionRate`] if the rate is outside [0, 1]
    /// - [`IsrError::InvalidSubsidy`] if the subsidy has negative amounts
    pub fn validate(&self) -> Result<(), IsrError> {
        if self.contribution_rate < Decimal::ZERO || self.contribution_rate > Decimal::ONE {
            return Err(IsrError::InvalidContributionRate(self.contribution_rate));
        }
        if let Some(subsidy) = &self.subsidy {
            subsidy.validate()?;
        }
        Ok(())
    }
}

/// Calculator over one bracket table.
///
/// The engine only borrows the table and never mutates anything, so a single
/// instance can serve any number of callers.
#[derive(Debug, Clone)]
pub struct IsrEngine<'a> {
    table: &'a BracketTable,
    config: EngineConfig,
}

impl<'a> IsrEngine<'a> {
    /// Creates an engine with the default [`EngineConfig`].
    pub fn new(table: &'a BracketTable) -> Self {
        Self {
            table,
            config: EngineConfig::default(),
        }
    }

    /// Creates an engine after validating `config`.
    pub fn with_config(
        table: &'a BracketTable,
        config: EngineConfig,
    ) -> Result<Self, IsrError> {
        config.validate()?;
        Ok(Self { table, config })
    }

    pub fn table(&self) -> &'a BracketTable {
        self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the whole pipeline for one set of inputs.
    ///
    /// # Errors
    ///
    /// Returns an [`IsrError`] of kind `InvalidInput` when gross pay,
    /// deductions or taxable income are out of range, or of kind
    /// `Configuration` when the table does not cover the taxable income.
    pub fn calculate(
        &self,
        inputs: &CalculationInputs,
    ) -> Result<IsrCalculation, IsrError> {
        let contribution = self.contribution(inputs.gross_pay, inputs.apply_contribution);
        let taxable_income = self.taxable_income(inputs)?;

        let breakdown = self.compute_breakdown(taxable_income)?;
        let breakdown = self.apply_subsidy(&breakdown, taxable_income);

        let net_pay = compute_net_pay(
            inputs.gross_pay,
            breakdown.tax,
            contribution,
            inputs.manual_deductions,
        );

        debug!(
            gross_pay = %inputs.gross_pay,
            %taxable_income,
            tax = %breakdown.tax,
            net_pay = %net_pay.rounded,
            "isr calculated"
        );

        Ok(IsrCalculation {
            inputs: *inputs,
            period: self.table.period(),
            contribution,
            taxable_income,
            breakdown,
            net_pay,
        })
    }

    /// IMSS contribution withheld from `gross_pay`.
    pub fn contribution(
        &self,
        gross_pay: Decimal,
        apply_contribution: bool,
    ) -> Decimal {
        if apply_contribution {
            gross_pay * self.config.contribution_rate
        } else {
            Decimal::ZERO
        }
    }

    /// Gross pay minus manual deductions minus contribution.
    ///
    /// # Errors
    ///
    /// - [`IsrError::NonPositiveGrossPay`] if gross pay is zero or less
    /// - [`IsrError::NegativeDeductions`] if manual deductions are negative
    /// - [`IsrError::NonPositiveTaxableIncome`] if nothing is left to tax
    pub fn taxable_income(
        &self,
        inputs: &CalculationInputs,
    ) -> Result<Decimal, IsrError> {
        if inputs.gross_pay <= Decimal::ZERO {
            warn!(gross_pay = %inputs.gross_pay, "rejected non-positive gross pay");
            return Err(IsrError::NonPositiveGrossPay(inputs.gross_pay));
        }
        if inputs.manual_deductions < Decimal::ZERO {
            warn!(manual_deductions = %inputs.manual_deductions, "rejected negative deductions");
            return Err(IsrError::NegativeDeductions(inputs.manual_deductions));
        }

        let contribution = self.contribution(inputs.gross_pay, inputs.apply_contribution);
        let taxable_income = inputs.gross_pay - inputs.manual_deductions - contribution;

        if taxable_income <= Decimal::ZERO {
            warn!(%taxable_income, "rejected non-positive taxable income");
            return Err(IsrError::NonPositiveTaxableIncome(taxable_income));
        }

        Ok(taxable_income)
    }

    /// Finds the bracket that covers `taxable_income`.
    ///
    /// # Errors
    ///
    /// - [`IsrError::NonPositiveTaxableIncome`] if `taxable_income` is zero or less
    /// - [`IsrError::NoMatchingBracket`] if the table stops below `taxable_income`
    pub fn lookup_bracket(
        &self,
        taxable_income: Decimal,
    ) -> Result<&'a TaxBracket, IsrError> {
        if taxable_income <= Decimal::ZERO {
            return Err(IsrError::NonPositiveTaxableIncome(taxable_income));
        }

        self.table
            .brackets()
            .iter()
            .find(|b| taxable_income <= b.upper_bound)
            .ok_or(IsrError::NoMatchingBracket(taxable_income))
    }

    /// Derives the tax for `taxable_income` from its bracket. No subsidy.
    ///
    /// Published bounds are whole cents, so an income with a fractional cent
    /// between one ceiling and the next floor is taxed at that floor.
    pub fn compute_breakdown(
        &self,
        taxable_income: Decimal,
    ) -> Result<TaxBreakdown, IsrError> {
        let bracket = self.lookup_bracket(taxable_income)?;

        let excess_amount = floor_at_zero(taxable_income - bracket.lower_bound);
        let marginal_tax = apply_percent(excess_amount, bracket.marginal_rate_percent);

        Ok(TaxBreakdown {
            tax: marginal_tax + bracket.base_amount,
            bracket_lower_bound: bracket.lower_bound,
            excess_amount,
            marginal_rate: bracket.marginal_rate_percent,
            marginal_tax,
            base_amount: bracket.base_amount,
            subsidy_credit: Decimal::ZERO,
        })
    }

    /// Applies the configured employment subsidy, if any.
    pub fn apply_subsidy(
        &self,
        breakdown: &TaxBreakdown,
        taxable_income: Decimal,
    ) -> TaxBreakdown {
        match &self.config.subsidy {
            Some(subsidy) => subsidy.apply(breakdown, taxable_income),
            None => breakdown.clone(),
        }
    }
}

/// Gross pay minus everything withheld, both exact and rounded to cents.
///
/// ```
/// use rust_decimal_macros::dec;
/// use isr_core::calculations::compute_net_pay;
///
/// let net = compute_net_pay(dec!(10000), dec!(729.015024), dec!(0), dec!(0));
///
/// assert_eq!(net.unrounded, dec!(9270.984976));
/// assert_eq!(net.rounded, dec!(9270.98));
/// ```
pub fn compute_net_pay(
    gross_pay: Decimal,
    tax: Decimal,
    contribution: Decimal,
    manual_deductions: Decimal,
) -> NetPay {
    let unrounded = gross_pay - tax - contribution - manual_deductions;
    NetPay {
        unrounded,
        rounded: round_half_up(unrounded),
    }
}
