use std::fmt;

use isr_core::IsrCalculation;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::utils::format_money;

/// How much of gross pay the worker keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetPayBand {
    Top,
    Comfortable,
    Fair,
    Tight,
    Heavy,
}

impl NetPayBand {
    /// Classifies a net/gross ratio.
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio >= dec!(0.85) {
            Self::Top
        } else if ratio >= dec!(0.70) {
            Self::Comfortable
        } else if ratio >= dec!(0.55) {
            Self::Fair
        } else if ratio >= dec!(0.40) {
            Self::Tight
        } else {
            Self::Heavy
        }
    }

    pub fn for_calculation(calculation: &IsrCalculation) -> Self {
        Self::from_ratio(calculation.net_ratio())
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Top => "you keep most of your pay",
            Self::Comfortable => "withholding is moderate",
            Self::Fair => "a noticeable share goes to withholding",
            Self::Tight => "withholding takes a large share",
            Self::Heavy => "deductions take most of your pay",
        }
    }
}

impl fmt::Display for NetPayBand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Top => "Top",
            Self::Comfortable => "Comfortable",
            Self::Fair => "Fair",
            Self::Tight => "Tight",
            Self::Heavy => "Heavy",
        };
        f.write_str(name)
    }
}

/// Multi-line result shown after every calculation.
pub fn render_summary(calculation: &IsrCalculation) -> String {
    let band = NetPayBand::for_calculation(calculation);
    let mut lines = vec![
        format!("Net pay:     ${} MXN", format_money(calculation.net_pay.rounded)),
        format!("Gross pay:   ${}", format_money(calculation.inputs.gross_pay)),
        format!(
            "Deductions:  ${}",
            format_money(calculation.inputs.manual_deductions)
        ),
        format!("IMSS:        ${}", format_money(calculation.contribution)),
        format!("ISR:         ${}", format_money(calculation.tax())),
    ];
    if calculation.breakdown.has_subsidy() {
        lines.push(format!(
            "Subsidy:     ${}",
            format_money(calculation.breakdown.subsidy_credit)
        ));
    }
    lines.push(format!("Band:        {band} ({})", band.description()));
    lines.join("\n")
}
