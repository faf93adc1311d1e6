use std::fmt;

use serde::{Deserialize, Serialize};

/// The pay period a bracket table is expressed in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PayPeriod {
    #[default]
    Monthly,
    Annual,
}

impl PayPeriod {
    pub fn all() -> &'static [PayPeriod] {
        &[PayPeriod::Monthly, PayPeriod::Annual]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "mensual" => Some(Self::Monthly),
            "annual" | "anual" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Number of months covered by one period. Monthly amounts such as the
    /// employment subsidy are scaled by this factor.
    pub fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Annual => 12,
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
