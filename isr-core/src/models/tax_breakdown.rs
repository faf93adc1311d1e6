use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the withholding tax for one taxable amount was derived.
///
/// Amounts are kept unrounded. `tax` always equals
/// `base_amount + marginal_tax - subsidy_credit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Withholding tax owed.
    pub tax: Decimal,
    /// Floor of the matched bracket.
    pub bracket_lower_bound: Decimal,
    /// Taxable income above `bracket_lower_bound`.
    pub excess_amount: Decimal,
    /// Marginal rate of the matched bracket, in percent.
    pub marginal_rate: Decimal,
    /// `excess_amount` times the marginal rate.
    pub marginal_tax: Decimal,
    /// Fixed tax of the matched bracket.
    pub base_amount: Decimal,
    /// Employment subsidy actually subtracted from the tax.
    pub subsidy_credit: Decimal,
}

impl TaxBreakdown {
    /// Tax before any subsidy.
    pub fn gross_tax(&self) -> Decimal {
        self.base_amount + self.marginal_tax
    }

    pub fn has_subsidy(&self) -> bool {
        self.subsidy_credit > Decimal::ZERO
    }
}

/// Net pay before and after rounding to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPay {
    /// Exact result, for any further arithmetic.
    pub unrounded: Decimal,
    /// Rounded half-up to two decimals, for display and records.
    pub rounded: Decimal,
}
