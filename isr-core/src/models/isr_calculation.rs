use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CalculationInputs, NetPay, PayPeriod, TaxBreakdown};

/// The complete result of one engine run.
///
/// This is what presentation code receives; nothing about the last
/// calculation is kept anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrCalculation {
    pub inputs: CalculationInputs,
    pub period: PayPeriod,
    /// IMSS worker contribution withheld (zero when not applied).
    pub contribution: Decimal,
    pub taxable_income: Decimal,
    pub breakdown: TaxBreakdown,
    pub net_pay: NetPay,
}

impl IsrCalculation {
    pub fn tax(&self) -> Decimal {
        self.breakdown.tax
    }

    /// Everything taken out of gross pay: tax, contribution and manual deductions.
    pub fn total_withheld(&self) -> Decimal {
        self.breakdown.tax + self.contribution + self.inputs.manual_deductions
    }

    /// Unrounded net pay as a fraction of gross pay.
    pub fn net_ratio(&self) -> Decimal {
        if self.inputs.gross_pay.is_zero() {
            return Decimal::ZERO;
        }
        self.net_pay.unrounded / self.inputs.gross_pay
    }
}
