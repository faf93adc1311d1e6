//! Validated, ordered ISR bracket tables.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

use super::{PayPeriod, TaxBracket};

/// Distance between one bracket's ceiling and the next bracket's floor.
pub const BRACKET_STEP: Decimal = dec!(0.01);

/// Problems found while validating a bracket table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("bracket table has no brackets")]
    Empty,

    #[error("bracket {index} has a negative bound or base amount")]
    NegativeValue { index: usize },

    #[error("bracket {index} has a marginal rate of {rate}%, expected 0 to 100")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("bracket {index} lower bound {lower} exceeds its upper bound {upper}")]
    InvertedBounds {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("bracket {index} starts at {lower} but the previous bracket ends at {previous_upper}")]
    NotContiguous {
        index: usize,
        previous_upper: Decimal,
        lower: Decimal,
    },
}

/// An ascending list of contiguous brackets for one pay period.
///
/// Tables can only be built through [`BracketTable::new`], which checks that
/// brackets are ordered, non-overlapping and exactly one cent apart. Lookups
/// can therefore rely on the first bracket whose ceiling is at or above an
/// amount being the only one that contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    period: PayPeriod,
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table after validating the bracket invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] describing the first violated invariant.
    pub fn new(
        period: PayPeriod,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, TableError> {
        validate(&brackets)?;
        Ok(Self { period, brackets })
    }

    /// Builds a table from rows known to be valid at compile time.
    pub(crate) fn from_rows(
        period: PayPeriod,
        rows: &[[Decimal; 4]],
    ) -> Self {
        let brackets = rows
            .iter()
            .map(|[lower, upper, base, rate]| TaxBracket::new(*lower, *upper, *base, *rate))
            .collect();
        Self { period, brackets }
    }

    pub fn period(&self) -> PayPeriod {
        self.period
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Re-runs validation on an existing table.
    pub fn validate(&self) -> Result<(), TableError> {
        validate(&self.brackets)
    }
}

fn validate(brackets: &[TaxBracket]) -> Result<(), TableError> {
    if brackets.is_empty() {
        return Err(TableError::Empty);
    }

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.lower_bound < Decimal::ZERO || bracket.base_amount < Decimal::ZERO {
            return Err(TableError::NegativeValue { index });
        }
        if bracket.marginal_rate_percent < Decimal::ZERO
            || bracket.marginal_rate_percent > Decimal::ONE_HUNDRED
        {
            return Err(TableError::InvalidRate {
                index,
                rate: bracket.marginal_rate_percent,
            });
        }
        if bracket.lower_bound > bracket.upper_bound {
            return Err(TableError::InvertedBounds {
                index,
                lower: bracket.lower_bound,
                upper: bracket.upper_bound,
            });
        }
    }

    for (index, pair) in brackets.windows(2).enumerate() {
        let (previous, next) = (&pair[0], &pair[1]);
        if previous.upper_bound.checked_add(BRACKET_STEP) != Some(next.lower_bound) {
            return Err(TableError::NotContiguous {
                index: index + 1,
                previous_upper: previous.upper_bound,
                lower: next.lower_bound,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bracket(
        lower: Decimal,
        upper: Decimal,
        base: Decimal,
        rate: Decimal,
    ) -> TaxBracket {
        TaxBracket::new(lower, upper, base, rate)
    }

    fn two_brackets() -> Vec<TaxBracket> {
        vec![
            bracket(dec!(0.01), dec!(844.59), dec!(0), dec!(1.92)),
            bracket(dec!(844.60), Decimal::MAX, dec!(16.22), dec!(6.40)),
        ]
    }

    #[test]
    fn new_accepts_contiguous_brackets() {
        let table = BracketTable::new(PayPeriod::Monthly, two_brackets()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.period(), PayPeriod::Monthly);
    }

    #[test]
    fn new_rejects_empty_table() {
        let result = BracketTable::new(PayPeriod::Monthly, vec![]);

        assert_eq!(result, Err(TableError::Empty));
    }

    #[test]
    fn new_rejects_gap_between_brackets() {
        let mut brackets = two_brackets();
        brackets[1].lower_bound = dec!(845.00);

        let result = BracketTable::new(PayPeriod::Monthly, brackets);

        assert_eq!(
            result,
            Err(TableError::NotContiguous {
                index: 1,
                previous_upper: dec!(844.59),
                lower: dec!(845.00),
            })
        );
    }

    #[test]
    fn new_rejects_overlapping_brackets() {
        let mut brackets = two_brackets();
        brackets[1].lower_bound = dec!(800.00);

        let result = BracketTable::new(PayPeriod::Monthly, brackets);

        assert!(matches!(result, Err(TableError::NotContiguous { index: 1, .. })));
    }

    #[test]
    fn new_rejects_bracket_after_unbounded_one() {
        let mut brackets = two_brackets();
        brackets.push(bracket(dec!(1000000), Decimal::MAX, dec!(0), dec!(35)));

        let result = BracketTable::new(PayPeriod::Monthly, brackets);

        assert!(matches!(result, Err(TableError::NotContiguous { index: 2, .. })));
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        let brackets = vec![bracket(dec!(100), dec!(50), dec!(0), dec!(1.92))];

        let result = BracketTable::new(PayPeriod::Annual, brackets);

        assert_eq!(
            result,
            Err(TableError::InvertedBounds {
                index: 0,
                lower: dec!(100),
                upper: dec!(50),
            })
        );
    }

    #[test]
    fn new_rejects_rate_above_one_hundred() {
        let mut brackets = two_brackets();
        brackets[0].marginal_rate_percent = dec!(192);

        let result = BracketTable::new(PayPeriod::Monthly, brackets);

        assert_eq!(
            result,
            Err(TableError::InvalidRate {
                index: 0,
                rate: dec!(192),
            })
        );
    }

    #[test]
    fn new_rejects_negative_base_amount() {
        let mut brackets = two_brackets();
        brackets[1].base_amount = dec!(-16.22);

        let result = BracketTable::new(PayPeriod::Monthly, brackets);

        assert_eq!(result, Err(TableError::NegativeValue { index: 1 }));
    }
}
