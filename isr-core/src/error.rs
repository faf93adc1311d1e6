use rust_decimal::Decimal;
use thiserror::Error;

/// Broad classification of an [`IsrError`].
///
/// Callers use this to decide between prompting the user for corrected
/// input and aborting outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user supplied values the engine cannot work with. Recoverable.
    InvalidInput,

    /// The bracket table or engine configuration is broken. Not recoverable
    /// by the user.
    Configuration,
}

/// Errors produced by the ISR engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IsrError {
    /// Gross pay was zero or negative.
    #[error("gross pay must be greater than zero, got {0}")]
    NonPositiveGrossPay(Decimal),

    /// Manual deductions were negative.
    #[error("manual deductions cannot be negative, got {0}")]
    NegativeDeductions(Decimal),

    /// Deductions and contribution consumed the whole gross pay.
    #[error("taxable income must be greater than zero, got {0}")]
    NonPositiveTaxableIncome(Decimal),

    /// Days worked outside the range a month can hold.
    #[error("days worked must be between 1 and {max}, got {days}")]
    InvalidDaysWorked { days: u32, max: u32 },

    /// Monthly salary times days worked does not fit in a decimal.
    #[error("monthly salary {monthly_salary} for {days} days is too large")]
    ProratedPayOverflow { monthly_salary: Decimal, days: u32 },

    /// The bracket table does not cover the taxable income.
    #[error("no tax bracket covers taxable income {0}")]
    NoMatchingBracket(Decimal),

    /// The contribution rate is outside [0, 1].
    #[error("contribution rate must be between 0 and 1, got {0}")]
    InvalidContributionRate(Decimal),

    /// The subsidy ceiling or credit is negative.
    #[error("subsidy ceiling and credit must be non-negative, got ceiling {ceiling} and credit {credit}")]
    InvalidSubsidy { ceiling: Decimal, credit: Decimal },
}

impl IsrError {
    /// Returns whether the error stems from user input or from configuration.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NonPositiveGrossPay(_)
            | Self::NegativeDeductions(_)
            | Self::NonPositiveTaxableIncome(_)
            | Self::InvalidDaysWorked { .. }
            | Self::ProratedPayOverflow { .. } => ErrorKind::InvalidInput,
            Self::NoMatchingBracket(_)
            | Self::InvalidContributionRate(_)
            | Self::InvalidSubsidy { .. } => ErrorKind::Configuration,
        }
    }

    /// Shorthand for `kind() == ErrorKind::InvalidInput`.
    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}
