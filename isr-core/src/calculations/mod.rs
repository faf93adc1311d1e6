//! The ISR calculation pipeline.
//!
//! `inputs -> taxable income -> bracket -> breakdown -> (subsidy) -> net pay`

pub mod common;
pub mod engine;
pub mod subsidy;

pub use engine::{EngineConfig, IMSS_WORKER_RATE, IsrEngine, compute_net_pay};
pub use subsidy::{EmploymentSubsidy, MONTHLY_SUBSIDY_CEILING, MONTHLY_SUBSIDY_CREDIT};
