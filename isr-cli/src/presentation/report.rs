//! Plain-text reports for paid tiers.
//!
//! Premium users get a short [`ReportStyle::Basic`] report; Super Premium
//! users get the [`ReportStyle::Professional`] layout with the full bracket
//! breakdown and a generation timestamp.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use isr_core::IsrCalculation;
use isr_core::tables::TABLE_YEAR;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::info;

use crate::entitlement::{ReportStyle, Tier};
use crate::utils::{format_money, format_percent};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("the {0} tier does not include reports")]
    NotEntitled(Tier),

    #[error("cannot write report '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders the report text for `style`.
pub fn render_report(
    calculation: &IsrCalculation,
    style: ReportStyle,
    generated_at: DateTime<Local>,
) -> String {
    match style {
        ReportStyle::Basic => render_basic(calculation),
        ReportStyle::Professional => render_professional(calculation, generated_at),
    }
}

fn render_basic(calculation: &IsrCalculation) -> String {
    let lines = [
        format!("ISR REPORT {TABLE_YEAR}"),
        RULE.to_string(),
        format!("Gross pay:         ${}", format_money(calculation.inputs.gross_pay)),
        format!(
            "Manual deductions: ${}",
            format_money(calculation.inputs.manual_deductions)
        ),
        format!("IMSS:              ${}", format_money(calculation.contribution)),
        format!("ISR:               ${}", format_money(calculation.tax())),
        THIN_RULE.to_string(),
        format!("NET PAY:           ${} MXN", format_money(calculation.net_pay.rounded)),
        RULE.to_string(),
        "Estimate only. Check your payslip with your employer.".to_string(),
    ];
    lines.join("\n") + "\n"
}

fn render_professional(
    calculation: &IsrCalculation,
    generated_at: DateTime<Local>,
) -> String {
    let breakdown = &calculation.breakdown;
    let contribution_rate = if calculation.inputs.gross_pay.is_zero() {
        Decimal::ZERO
    } else {
        calculation.contribution / calculation.inputs.gross_pay * dec!(100)
    };

    let mut lines = vec![
        format!("ISR PROFESSIONAL REPORT {TABLE_YEAR}"),
        format!("Generated: {}", generated_at.format("%d/%m/%Y %H:%M:%S")),
        format!("Pay period: {}", calculation.period),
        RULE.to_string(),
        "INPUTS".to_string(),
        format!("  Gross pay:           ${}", format_money(calculation.inputs.gross_pay)),
        format!(
            "  Manual deductions:   ${}",
            format_money(calculation.inputs.manual_deductions)
        ),
        format!(
            "  IMSS ({}):        ${}",
            format_percent(contribution_rate),
            format_money(calculation.contribution)
        ),
        format!("  Taxable income:      ${}", format_money(calculation.taxable_income)),
        THIN_RULE.to_string(),
        "ISR CALCULATION".to_string(),
        format!(
            "  Bracket floor:       ${}",
            format_money(breakdown.bracket_lower_bound)
        ),
        format!("  Excess over floor:   ${}", format_money(breakdown.excess_amount)),
        format!("  Marginal rate:       {}", format_percent(breakdown.marginal_rate)),
        format!("  Marginal tax:        ${}", format_money(breakdown.marginal_tax)),
        format!("  Base amount:         ${}", format_money(breakdown.base_amount)),
    ];
    if breakdown.has_subsidy() {
        lines.push(format!(
            "  Subsidy applied:    -${}",
            format_money(breakdown.subsidy_credit)
        ));
    }
    lines.extend([
        format!("  ISR withheld:        ${}", format_money(breakdown.tax)),
        THIN_RULE.to_string(),
        format!(
            "NET PAY:               ${} MXN",
            format_money(calculation.net_pay.rounded)
        ),
        RULE.to_string(),
        format!("Computed with the {TABLE_YEAR} withholding tables."),
        "Estimate only. Check your payslip with your employer.".to_string(),
    ]);
    lines.join("\n") + "\n"
}

/// `ISR_<Tier>_<millis>.txt`
pub fn report_file_name(
    tier: Tier,
    generated_at: DateTime<Local>,
) -> String {
    format!("ISR_{}_{}.txt", tier.file_tag(), generated_at.timestamp_millis())
}

/// Writes the report `tier` is entitled to into `dir` and returns its path.
///
/// # Errors
///
/// [`ReportError::NotEntitled`] for tiers without reports, or
/// [`ReportError::Io`] when the directory or file cannot be written.
pub fn write_report(
    dir: &Path,
    calculation: &IsrCalculation,
    tier: Tier,
    generated_at: DateTime<Local>,
) -> Result<PathBuf, ReportError> {
    let style = tier.report_style().ok_or(ReportError::NotEntitled(tier))?;

    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(report_file_name(tier, generated_at));
    let text = render_report(calculation, style, generated_at);
    fs::write(&path, text).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), ?style, "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use isr_core::calculations::EmploymentSubsidy;
    use isr_core::{CalculationInputs, EngineConfig, IsrEngine, PayPeriod, tables};
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    fn calculation(subsidy: bool) -> IsrCalculation {
        let table = tables::monthly_2025();
        let mut config = EngineConfig::default();
        if subsidy {
            config = config.with_subsidy(EmploymentSubsidy::for_period(PayPeriod::Monthly));
        }
        let engine = IsrEngine::with_config(&table, config).unwrap();
        engine
            .calculate(&CalculationInputs::new(dec!(10000)).with_contribution(true))
            .unwrap()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("isr-report-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    #[test]
    fn basic_report_has_totals_only() {
        let text = render_report(&calculation(false), ReportStyle::Basic, fixed_time());

        assert!(text.starts_with("ISR REPORT 2025\n"));
        assert!(text.contains("Gross pay:         $10,000.00"));
        assert!(text.contains("IMSS:              $62.50"));
        assert!(text.contains("ISR:               $722.22"));
        assert!(text.contains("NET PAY:           $9,215.28 MXN"));
        assert!(!text.contains("Generated"));
        assert!(!text.contains("Marginal rate"));
    }

    #[test]
    fn professional_report_has_timestamp_and_breakdown() {
        let text = render_report(&calculation(false), ReportStyle::Professional, fixed_time());

        assert!(text.contains("Generated: 14/03/2025 09:26:53"));
        assert!(text.contains("Pay period: monthly"));
        assert!(text.contains("IMSS (0.63%):        $62.50"));
        assert!(text.contains("Taxable income:      $9,937.50"));
        assert!(text.contains("Bracket floor:       $7,168.52"));
        assert!(text.contains("Marginal rate:       10.88%"));
        assert!(text.contains("Base amount:         $420.95"));
        assert!(text.contains("NET PAY:               $9,215.28 MXN"));
        assert!(!text.contains("Subsidy applied"));
    }

    #[test]
    fn professional_report_shows_subsidy_line_when_applied() {
        let text = render_report(&calculation(true), ReportStyle::Professional, fixed_time());

        assert!(text.contains("Subsidy applied:    -$536.22"));
    }

    #[test]
    fn file_name_uses_tier_and_millis() {
        let at = fixed_time();

        let name = report_file_name(Tier::SuperPremium, at);

        assert_eq!(name, format!("ISR_SuperPremium_{}.txt", at.timestamp_millis()));
    }

    // -----------------------------------------------------------------------
    // Writing
    // -----------------------------------------------------------------------

    #[test]
    fn write_report_creates_file_in_directory() {
        let dir = temp_dir("premium");

        let path = write_report(&dir, &calculation(false), Tier::Premium, fixed_time()).unwrap();

        assert!(path.starts_with(&dir));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("ISR REPORT 2025"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn free_tier_cannot_write_reports() {
        let dir = temp_dir("free");

        let err = write_report(&dir, &calculation(false), Tier::Free, fixed_time()).unwrap_err();

        assert!(matches!(err, ReportError::NotEntitled(Tier::Free)));
        assert!(!dir.exists());
    }
}
