//! Optional TOML configuration for `isr-calc`.
//!
//! Every field has a default, so an empty file (or no file at all) is valid.
//! Command-line flags are applied on top with [`AppConfig::apply_overrides`].
//!
//! ```toml
//! period = "monthly"
//! contribution_rate = "0.00625"
//! apply_subsidy = true
//! tier = "premium"
//! report_dir = "reports"
//! log_level = "debug"
//! ```

use std::path::{Path, PathBuf};

use isr_core::calculations::{EmploymentSubsidy, IMSS_WORKER_RATE};
use isr_core::{EngineConfig, PayPeriod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::entitlement::Tier;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Pay period of the bracket table in use.
    pub period: PayPeriod,
    /// IMSS worker contribution rate as a fraction of gross pay.
    pub contribution_rate: Decimal,
    /// Apply the employment subsidy credit to low incomes.
    pub apply_subsidy: bool,
    pub tier: Tier,
    /// Directory where text reports are written.
    pub report_dir: PathBuf,
    /// Bracket table CSV to use instead of the built-in 2025 tables.
    pub table_file: Option<PathBuf>,
    /// EnvFilter directive used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Append log records to this file as well as the terminal.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            period: PayPeriod::Monthly,
            contribution_rate: IMSS_WORKER_RATE,
            apply_subsidy: false,
            tier: Tier::Free,
            report_dir: PathBuf::from("."),
            table_file: None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Values given on the command line. `None` keeps the file's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub period: Option<PayPeriod>,
    pub apply_subsidy: bool,
    pub tier: Option<Tier>,
    pub report_dir: Option<PathBuf>,
    pub table_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_toml_str(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, or returns the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn apply_overrides(
        mut self,
        overrides: ConfigOverrides,
    ) -> Self {
        if let Some(period) = overrides.period {
            self.period = period;
        }
        if overrides.apply_subsidy {
            self.apply_subsidy = true;
        }
        if let Some(tier) = overrides.tier {
            self.tier = tier;
        }
        if let Some(dir) = overrides.report_dir {
            self.report_dir = dir;
        }
        if let Some(file) = overrides.table_file {
            self.table_file = Some(file);
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self
    }

    /// Engine settings for the configured period.
    pub fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig::default().with_contribution_rate(self.contribution_rate);
        if self.apply_subsidy {
            config.with_subsidy(EmploymentSubsidy::for_period(self.period))
        } else {
            config
        }
    }
}
