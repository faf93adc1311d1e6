mod bracket_table;
mod calculation_inputs;
mod isr_calculation;
mod pay_period;
mod tax_breakdown;
mod tax_bracket;

pub use bracket_table::{BRACKET_STEP, BracketTable, TableError};
pub use calculation_inputs::{CalculationInputs, DAYS_PER_MONTH, MAX_DAYS_WORKED};
pub use isr_calculation::IsrCalculation;
pub use pay_period::PayPeriod;
pub use tax_breakdown::{NetPay, TaxBreakdown};
pub use tax_bracket::TaxBracket;
