//! Subscription tiers and what each one unlocks.
//!
//! The engine never looks at the tier; it only decides which presentation
//! sinks run after a calculation.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Subscription level of the current user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    #[default]
    Free,
    Premium,
    SuperPremium,
}

/// Layout of the text report a tier is entitled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    Basic,
    Professional,
}

impl Tier {
    pub fn all() -> &'static [Tier] {
        &[Tier::Free, Tier::Premium, Tier::SuperPremium]
    }

    /// Name used in report file names.
    pub fn file_tag(&self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Premium => "Premium",
            Tier::SuperPremium => "SuperPremium",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Premium => "Premium",
            Tier::SuperPremium => "Super Premium",
        }
    }

    pub fn shows_ads(&self) -> bool {
        matches!(self, Tier::Free)
    }

    pub fn can_chart(&self) -> bool {
        !self.shows_ads()
    }

    pub fn report_style(&self) -> Option<ReportStyle> {
        match self {
            Tier::Free => None,
            Tier::Premium => Some(ReportStyle::Basic),
            Tier::SuperPremium => Some(ReportStyle::Professional),
        }
    }

    /// Notice printed instead of the paid sinks.
    pub fn upgrade_notice(&self) -> Option<&'static str> {
        match self {
            Tier::Free => Some(
                "Free plan: upgrade to Premium for the pay chart and a text report, \
                 or to Super Premium for the professional report.",
            ),
            Tier::Premium => Some("Upgrade to Super Premium for the professional report."),
            Tier::SuperPremium => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
