//! Employment subsidy (subsidio para el empleo).
//!
//! Workers whose taxable income is at or below a ceiling get a fixed credit
//! against their withholding tax. The credit never turns the tax negative.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::floor_at_zero;
use crate::error::IsrError;
use crate::models::{PayPeriod, TaxBreakdown};

/// Monthly taxable income at or below which the subsidy applies.
pub const MONTHLY_SUBSIDY_CEILING: Decimal = dec!(11492.66);

/// Monthly credit subtracted from the tax.
pub const MONTHLY_SUBSIDY_CREDIT: Decimal = dec!(536.22);

/// Ceiling and credit for one pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentSubsidy {
    pub income_ceiling: Decimal,
    pub credit: Decimal,
}

impl EmploymentSubsidy {
    /// The monthly amounts scaled to `period`.
    pub fn for_period(period: PayPeriod) -> Self {
        let months = Decimal::from(period.months());
        Self {
            income_ceiling: MONTHLY_SUBSIDY_CEILING * months,
            credit: MONTHLY_SUBSIDY_CREDIT * months,
        }
    }

    pub fn validate(&self) -> Result<(), IsrError> {
        if self.income_ceiling < Decimal::ZERO || self.credit < Decimal::ZERO {
            return Err(IsrError::InvalidSubsidy {
                ceiling: self.income_ceiling,
                credit: self.credit,
            });
        }
        Ok(())
    }

    /// Subtracts the credit from `breakdown` when `taxable_income` qualifies.
    ///
    /// A breakdown that already carries a credit is returned unchanged, so
    /// the subsidy can never be counted twice.
    pub fn apply(
        &self,
        breakdown: &TaxBreakdown,
        taxable_income: Decimal,
    ) -> TaxBreakdown {
        if breakdown.has_subsidy() || taxable_income > self.income_ceiling {
            return breakdown.clone();
        }

        let tax = floor_at_zero(breakdown.tax - self.credit);
        let subsidy_credit = breakdown.tax - tax;
        debug!(%taxable_income, %subsidy_credit, "employment subsidy applied");

        TaxBreakdown {
            tax,
            subsidy_credit,
            ..breakdown.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn breakdown_with_tax(tax: Decimal) -> TaxBreakdown {
        TaxBreakdown {
            tax,
            bracket_lower_bound: dec!(0.01),
            excess_amount: Decimal::ZERO,
            marginal_rate: dec!(1.92),
            marginal_tax: Decimal::ZERO,
            base_amount: tax,
            subsidy_credit: Decimal::ZERO,
        }
    }

    #[test]
    fn for_period_monthly_uses_published_amounts() {
        let subsidy = EmploymentSubsidy::for_period(PayPeriod::Monthly);

        assert_eq!(subsidy.income_ceiling, dec!(11492.66));
        assert_eq!(subsidy.credit, dec!(536.22));
    }

    #[test]
    fn for_period_annual_scales_by_twelve() {
        let subsidy = EmploymentSubsidy::for_period(PayPeriod::Annual);

        assert_eq!(subsidy.income_ceiling, dec!(137911.92));
        assert_eq!(subsidy.credit, dec!(6434.64));
    }

    #[test]
    fn apply_subtracts_credit_below_ceiling() {
        let subsidy = EmploymentSubsidy::for_period(PayPeriod::Monthly);

        let result = subsidy.apply(&breakdown_with_tax(dec!(729.02)), dec!(10000));

        assert_eq!(result.tax, dec!(192.80));
        assert_eq!(result.subsidy_credit, dec!(536.22));
    }

    #[test]
    fn apply_at_ceiling_still_qualifies() {
        let subsidy = EmploymentSubsidy::for_period(PayPeriod::Monthly);

        let result = subsidy.apply(&breakdown_with_tax(dec!(900.00)), dec!(11492.66));

        assert_eq!(result.tax, dec!(363.78));
    }

    #[test]
    fn apply_above_ceiling_is_unchanged() {
        let subsidy = EmploymentSubsidy::for_period(PayPeriod::Monthly);
        let breakdown = breakdown_with_tax(dec!(900.00));

        let result = subsidy.apply(&breakdown, dec!(11492.67));

        assert_eq!(result, breakdown);
    }

    #[test]
    fn apply_floors_tax_at_zero() {
        let subsidy = EmploymentSubsidy::for_period(PayPeriod::Monthly);

        let result = subsidy.apply(&breakdown_with_tax(dec!(16.22)), dec!(844.60));

        assert_eq!(result.tax, Decimal::ZERO);
        assert_eq!(result.subsidy_credit, dec!(16.22));
    }

    #[test]
    fn apply_twice_only_counts_once() {
        let subsidy = EmploymentSubsidy::for_period(PayPeriod::Monthly);

        let once = subsidy.apply(&breakdown_with_tax(dec!(729.02)), dec!(10000));
        let twice = subsidy.apply(&once, dec!(10000));

        assert_eq!(twice, once);
    }

    #[test]
    fn validate_rejects_negative_credit() {
        let subsidy = EmploymentSubsidy {
            income_ceiling: dec!(11492.66),
            credit: dec!(-1),
        };

        assert!(subsidy.validate().is_err());
    }
}
