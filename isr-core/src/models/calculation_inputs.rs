use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::IsrError;

/// Days in the commercial month used to derive a daily salary.
pub const DAYS_PER_MONTH: u32 = 30;

/// Upper limit accepted for days worked in a month.
pub const MAX_DAYS_WORKED: u32 = 31;

/// Values collected from the user for a single calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInputs {
    /// Gross pay for the period.
    pub gross_pay: Decimal,

    /// Deductions the user enters by hand. Defaults to zero.
    #[serde(default)]
    pub manual_deductions: Decimal,

    /// Whether the worker's IMSS contribution is withheld. Defaults to false.
    #[serde(default)]
    pub apply_contribution: bool,
}

impl CalculationInputs {
    pub fn new(gross_pay: Decimal) -> Self {
        Self {
            gross_pay,
            ..Default::default()
        }
    }

    pub fn with_deductions(
        mut self,
        manual_deductions: Decimal,
    ) -> Self {
        self.manual_deductions = manual_deductions;
        self
    }

    pub fn with_contribution(
        mut self,
        apply_contribution: bool,
    ) -> Self {
        self.apply_contribution = apply_contribution;
        self
    }

    /// Builds inputs for a partial month.
    ///
    /// Gross pay is the daily salary (`monthly_salary / 30`) times the days
    /// actually worked.
    ///
    /// # Errors
    ///
    /// Returns [`IsrError::InvalidDaysWorked`] when `days_worked` is zero or
    /// above [`MAX_DAYS_WORKED`], and [`IsrError::ProratedPayOverflow`] when
    /// the salary is too large to multiply by the days worked.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use isr_core::CalculationInputs;
    ///
    /// let inputs = CalculationInputs::prorated(dec!(30000.00), 15).unwrap();
    ///
    /// assert_eq!(inputs.gross_pay, dec!(15000.00));
    /// ```
    pub fn prorated(
        monthly_salary: Decimal,
        days_worked: u32,
    ) -> Result<Self, IsrError> {
        if days_worked == 0 || days_worked > MAX_DAYS_WORKED {
            return Err(IsrError::InvalidDaysWorked {
                days: days_worked,
                max: MAX_DAYS_WORKED,
            });
        }

        let worked = monthly_salary
            .checked_mul(Decimal::from(days_worked))
            .ok_or(IsrError::ProratedPayOverflow {
                monthly_salary,
                days: days_worked,
            })?;
        Ok(Self::new(worked / Decimal::from(DAYS_PER_MONTH)))
    }
}
