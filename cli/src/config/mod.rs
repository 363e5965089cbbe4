//! Configuration management for the EcoWise shell
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: ECOWISE__)

use anyhow::Result;
use ecowise_shared::{EmissionUnit, DEFAULT_BASELINE_TONNES};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Baseline comparison settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Global average footprint, tonnes CO₂/year
    pub baseline_tonnes: f64,
}

/// Where the session profile is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub profile_path: PathBuf,
}

/// Report rendering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub emission_unit: EmissionUnit,
}

/// Log output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Force JSON log lines outside production
    #[serde(default)]
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                baseline_tonnes: DEFAULT_BASELINE_TONNES,
            },
            session: SessionConfig {
                profile_path: PathBuf::from("ecowise_profile.json"),
            },
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with ECOWISE__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., ECOWISE__ANALYSIS__BASELINE_TONNES=6.0 sets analysis.baseline_tonnes
            .add_source(config::Environment::with_prefix("ECOWISE").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let baseline = self.analysis.baseline_tonnes;
        if !baseline.is_finite() || baseline <= 0.0 {
            anyhow::bail!(
                "analysis.baseline_tonnes must be a positive number (got {})",
                baseline
            );
        }
        if self.session.profile_path.as_os_str().is_empty() {
            anyhow::bail!("session.profile_path must not be empty");
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// JSON log lines in production or when asked for
    pub fn json_logs(&self) -> bool {
        self.logging.json || Self::is_production()
    }
}
