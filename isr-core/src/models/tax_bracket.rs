use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a progressive ISR table.
///
/// The last bracket of a table uses [`Decimal::MAX`] as its upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive floor of taxable income for this bracket.
    pub lower_bound: Decimal,
    /// Inclusive ceiling of taxable income for this bracket.
    pub upper_bound: Decimal,
    /// Fixed tax owed on all income below `lower_bound`.
    pub base_amount: Decimal,
    /// Rate applied to the excess over `lower_bound`, in percent (6.40 = 6.40 %).
    pub marginal_rate_percent: Decimal,
}

impl TaxBracket {
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Decimal,
        base_amount: Decimal,
        marginal_rate_percent: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            base_amount,
            marginal_rate_percent,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper_bound == Decimal::MAX
    }

    pub fn contains(
        &self,
        amount: Decimal,
    ) -> bool {
        amount >= self.lower_bound && amount <= self.upper_bound
    }
}
