//! Sinks that turn an [`IsrCalculation`](isr_core::IsrCalculation) into
//! something a person reads.
//!
//! Each sink receives the calculation explicitly; none of them keeps a copy
//! of "the last result".

pub mod chart;
pub mod history;
pub mod report;
pub mod summary;

pub use chart::{PaySplit, Slice};
pub use history::{History, HistoryEntry};
pub use report::{ReportError, render_report, write_report};
pub use summary::{NetPayBand, render_summary};
