//! Application configuration management.
//!
//! This module handles loading and saving the shiftbook configuration: the
//! fixed UTC offset attendance days are bucketed in, how many fiscal years
//! and months the pickers offer, and the calendar colour-tier thresholds.
//!
//! Configuration is stored at `~/.config/shiftbook/config.json`. The
//! `SHIFTBOOK_TIMEZONE` environment variable overrides the stored offset.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attendance::ColorTierPolicy;
use crate::calendar::DEFAULT_MONTH_OPTION_COUNT;
use crate::fiscal::DEFAULT_FINANCIAL_YEAR_COUNT;
use crate::zone::{DayZone, DEFAULT_TIMEZONE};

/// Application name used for config/log directory paths
const APP_NAME: &str = "shiftbook";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding `timezone`
pub const TIMEZONE_ENV: &str = "SHIFTBOOK_TIMEZONE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed UTC offset used to bucket timestamps into days, e.g. "+05:30"
    pub timezone: String,
    pub financial_year_count: usize,
    pub month_option_count: usize,
    pub color_tiers: ColorTierPolicy,
    /// Also write logs to a daily file under `log_dir()`
    pub log_to_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            financial_year_count: DEFAULT_FINANCIAL_YEAR_COUNT,
            month_option_count: DEFAULT_MONTH_OPTION_COUNT,
            color_tiers: ColorTierPolicy::default(),
            log_to_file: false,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when no
    /// file exists, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(timezone) = std::env::var(TIMEZONE_ENV) {
            debug!(timezone = %timezone, "Timezone overridden from environment");
            config.timezone = timezone;
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join("logs"))
    }

    /// The configured day zone
    pub fn day_zone(&self) -> Result<DayZone> {
        self.timezone
            .parse()
            .with_context(|| format!("Invalid `timezone` in config: {}", self.timezone))
    }

    /// The configured colour-tier thresholds, validated
    pub fn tier_policy(&self) -> Result<ColorTierPolicy> {
        self.color_tiers
            .validate()
            .context("Invalid `color_tiers` in config")?;
        Ok(self.color_tiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.day_zone().unwrap(), DayZone::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = Config {
            timezone: "UTC".to_string(),
            financial_year_count: 5,
            color_tiers: ColorTierPolicy::new(2, 4, 8).unwrap(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.day_zone().unwrap(), DayZone::utc());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "month_option_count": 6 }"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.month_option_count, 6);
        assert_eq!(loaded.timezone, DEFAULT_TIMEZONE);
        assert_eq!(loaded.financial_year_count, DEFAULT_FINANCIAL_YEAR_COUNT);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_invalid_settings_surface_errors() {
        let config = Config {
            timezone: "Asia/Kolkata".to_string(),
            color_tiers: ColorTierPolicy {
                low_max: 4,
                medium_max: 2,
                high_max: 5,
            },
            ..Config::default()
        };
        assert!(config.day_zone().is_err());
        assert!(config.tier_policy().is_err());
    }
}
