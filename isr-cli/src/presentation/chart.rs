use isr_core::IsrCalculation;
use isr_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::utils::format_money;

/// One labelled part of the pay split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub label: &'static str,
    pub amount: Decimal,
    /// Share of the total in percent, rounded to two decimals.
    pub share_percent: Decimal,
}

/// Where gross pay goes: ISR, IMSS and what is left as net pay.
///
/// Manual deductions are not charted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaySplit {
    slices: [Slice; 3],
}

impl PaySplit {
    pub fn from_calculation(calculation: &IsrCalculation) -> Self {
        let tax = round_half_up(calculation.tax());
        let contribution = round_half_up(calculation.contribution);
        let net = calculation.net_pay.rounded;
        let total = tax + contribution + net;

        let slice = |label, amount: Decimal| Slice {
            label,
            amount,
            share_percent: if total > Decimal::ZERO {
                round_half_up(amount / total * dec!(100))
            } else {
                Decimal::ZERO
            },
        };

        Self {
            slices: [slice("ISR", tax), slice("IMSS", contribution), slice("Net", net)],
        }
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn total(&self) -> Decimal {
        self.slices.iter().map(|s| s.amount).sum()
    }

    /// Horizontal text bars, `width` characters for a 100 % share.
    pub fn render(
        &self,
        width: usize,
    ) -> String {
        self.slices
            .iter()
            .map(|slice| {
                let filled = (slice.share_percent * Decimal::from(width) / dec!(100))
                    .round()
                    .to_usize()
                    .unwrap_or(0)
                    .min(width);
                format!(
                    "{:<5}|{}{}| {:>6.2}%  ${}",
                    slice.label,
                    "#".repeat(filled),
                    " ".repeat(width - filled),
                    slice.share_percent,
                    format_money(slice.amount)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
