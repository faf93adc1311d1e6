//! Mexican ISR withholding engine.
//!
//! Given gross pay, manual deductions and whether the worker's IMSS
//! contribution is withheld, the engine finds the matching bracket of a
//! progressive table, applies the marginal rate, optionally subtracts the
//! employment subsidy and derives net pay.

pub mod calculations;
pub mod error;
pub mod models;
pub mod tables;

pub use calculations::{EngineConfig, IsrEngine};
pub use error::{ErrorKind, IsrError};
pub use models::*;
