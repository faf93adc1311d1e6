//! Built-in ISR withholding tables.
//!
//! Rows are `[lower_bound, upper_bound, base_amount, marginal_rate_percent]`.
//! The annual table is the monthly table multiplied by twelve, as published.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{BracketTable, PayPeriod};

/// Tax year of the built-in tables.
pub const TABLE_YEAR: i32 = 2025;

const MONTHLY_2025: [[Decimal; 4]; 11] = [
    [dec!(0.01), dec!(844.59), dec!(0.00), dec!(1.92)],
    [dec!(844.60), dec!(7168.51), dec!(16.22), dec!(6.40)],
    [dec!(7168.52), dec!(12598.02), dec!(420.95), dec!(10.88)],
    [dec!(12598.03), dec!(14644.64), dec!(1011.68), dec!(16.00)],
    [dec!(14644.65), dec!(17533.64), dec!(1339.14), dec!(17.92)],
    [dec!(17533.65), dec!(35362.83), dec!(1856.84), dec!(21.36)],
    [dec!(35362.84), dec!(55736.68), dec!(5665.16), dec!(23.52)],
    [dec!(55736.69), dec!(106410.50), dec!(10457.09), dec!(30.00)],
    [dec!(106410.51), dec!(141880.66), dec!(25659.23), dec!(32.00)],
    [dec!(141880.67), dec!(425641.99), dec!(37009.69), dec!(34.00)],
    [dec!(425642.00), Decimal::MAX, dec!(133488.54), dec!(35.00)],
];

const ANNUAL_2025: [[Decimal; 4]; 11] = [
    [dec!(0.01), dec!(10135.11), dec!(0.00), dec!(1.92)],
    [dec!(10135.12), dec!(86022.11), dec!(194.59), dec!(6.40)],
    [dec!(86022.12), dec!(151176.19), dec!(5051.37), dec!(10.88)],
    [dec!(151176.20), dec!(175735.68), dec!(12140.16), dec!(16.00)],
    [dec!(175735.69), dec!(210403.68), dec!(16069.64), dec!(17.92)],
    [dec!(210403.69), dec!(424354.00), dec!(22282.08), dec!(21.36)],
    [dec!(424354.01), dec!(668840.16), dec!(67981.92), dec!(23.52)],
    [dec!(668840.17), dec!(1276926.00), dec!(125485.08), dec!(30.00)],
    [dec!(1276926.01), dec!(1702567.92), dec!(307910.76), dec!(32.00)],
    [dec!(1702567.93), dec!(5107703.88), dec!(444116.28), dec!(34.00)],
    [dec!(5107703.89), Decimal::MAX, dec!(1601862.48), dec!(35.00)],
];

/// Monthly withholding table.
pub fn monthly_2025() -> BracketTable {
    BracketTable::from_rows(PayPeriod::Monthly, &MONTHLY_2025)
}

/// Annual table.
pub fn annual_2025() -> BracketTable {
    BracketTable::from_rows(PayPeriod::Annual, &ANNUAL_2025)
}

/// Returns the built-in table for `period`.
pub fn builtin(period: PayPeriod) -> BracketTable {
    match period {
        PayPeriod::Monthly => monthly_2025(),
        PayPeriod::Annual => annual_2025(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn monthly_table_is_valid() {
        let table = monthly_2025();

        assert_eq!(table.validate(), Ok(()));
        assert_eq!(table.len(), 11);
        assert_eq!(table.period(), PayPeriod::Monthly);
    }

    #[test]
    fn annual_table_is_valid() {
        let table = annual_2025();

        assert_eq!(table.validate(), Ok(()));
        assert_eq!(table.len(), 11);
        assert_eq!(table.period(), PayPeriod::Annual);
    }

    #[test]
    fn tables_end_unbounded() {
        for period in PayPeriod::all() {
            let table = builtin(*period);
            let last = table.brackets().last().unwrap();

            assert!(last.is_unbounded());
        }
    }

    #[test]
    fn annual_rates_match_monthly_rates() {
        let monthly = monthly_2025();
        let annual = annual_2025();

        for (m, a) in monthly.brackets().iter().zip(annual.brackets()) {
            assert_eq!(m.marginal_rate_percent, a.marginal_rate_percent);
        }
    }

    #[test]
    fn annual_ceilings_are_twelve_monthly_ceilings() {
        let monthly = monthly_2025();
        let annual = annual_2025();

        for (m, a) in monthly.brackets().iter().zip(annual.brackets()) {
            if m.is_unbounded() {
                continue;
            }
            // Published annual ceilings are within a few cents of 12x monthly.
            let diff = (m.upper_bound * dec!(12) - a.upper_bound).abs();
            assert!(diff <= dec!(0.12), "monthly {} vs annual {}", m.upper_bound, a.upper_bound);
        }
    }
}
