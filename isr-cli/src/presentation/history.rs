use chrono::{DateTime, Local};
use isr_core::IsrCalculation;

use crate::utils::format_money;

/// One remembered calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: u64,
    pub recorded_at: DateTime<Local>,
    pub summary: String,
}

/// In-memory list of past calculations for the current session.
///
/// Ids start at 1 and increase by one per recorded calculation.
#[derive(Debug, Clone)]
pub struct History {
    next_id: u64,
    entries: Vec<HistoryEntry>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Stores a one-line summary of `calculation` and returns its id.
    pub fn record(
        &mut self,
        calculation: &IsrCalculation,
        recorded_at: DateTime<Local>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(HistoryEntry {
            id,
            recorded_at,
            summary: summarize(calculation),
        });
        id
    }

    pub fn get(
        &self,
        id: u64,
    ) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One line per entry, oldest first.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("#{:<3} {}  {}", e.id, e.recorded_at.format("%H:%M:%S"), e.summary))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn summarize(calculation: &IsrCalculation) -> String {
    format!(
        "Gross ${} | ISR ${} | IMSS ${} | Net ${}",
        format_money(calculation.inputs.gross_pay),
        format_money(calculation.tax()),
        format_money(calculation.contribution),
        format_money(calculation.net_pay.rounded)
    )
}
