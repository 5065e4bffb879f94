//! JSON configuration for a savings session.
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use crate::aggregation::DEFAULT_REFERENCE_MONTHLY_COST;
use crate::countdowns::{default_events, CountdownEvent, DEFAULT_COUNTDOWN_INTERVAL_SECS};
use crate::data_structures::Category;
use crate::favorites::DEFAULT_FAVORITES_KEY;
use crate::gas::GasSource;
use crate::notifications::DEFAULT_TOAST_DURATION_MS;
use crate::panels::DEFAULT_RECALC_DELAY_MS;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_WEATHER_INTERVAL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GasConfig {
    #[serde(default)]
    pub source: GasSource,
    /// Overrides the built-in price table when `source` is `prices`.
    #[serde(default)]
    pub prices: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub prices_as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsConfig {
    #[serde(default)]
    pub initial_tab: Category,
    #[serde(default = "default_recalc_delay_ms")]
    pub recalc_delay_ms: i64,
    #[serde(default = "default_reference_monthly_cost")]
    pub reference_monthly_cost: f64,
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
    /// File backing the session store; `None` keeps favorites in memory.
    #[serde(default)]
    pub session_store: Option<PathBuf>,
    #[serde(default = "default_countdown_interval_secs")]
    pub countdown_interval_secs: i64,
    #[serde(default = "default_weather_interval_secs")]
    pub weather_interval_secs: i64,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: i64,
    #[serde(default)]
    pub gas: GasConfig,
    #[serde(default = "default_events")]
    pub events: Vec<CountdownEvent>,
}

fn default_recalc_delay_ms() -> i64 {
    DEFAULT_RECALC_DELAY_MS
}

fn default_reference_monthly_cost() -> f64 {
    DEFAULT_REFERENCE_MONTHLY_COST
}

fn default_favorites_key() -> String {
    DEFAULT_FAVORITES_KEY.to_string()
}

fn default_countdown_interval_secs() -> i64 {
    DEFAULT_COUNTDOWN_INTERVAL_SECS
}

fn default_weather_interval_secs() -> i64 {
    DEFAULT_WEATHER_INTERVAL_SECS
}

fn default_toast_duration_ms() -> i64 {
    DEFAULT_TOAST_DURATION_MS
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            initial_tab: Category::default(),
            recalc_delay_ms: default_recalc_delay_ms(),
            reference_monthly_cost: default_reference_monthly_cost(),
            favorites_key: default_favorites_key(),
            session_store: None,
            countdown_interval_secs: default_countdown_interval_secs(),
            weather_interval_secs: default_weather_interval_secs(),
            toast_duration_ms: default_toast_duration_ms(),
            gas: GasConfig::default(),
            events: default_events(),
        }
    }
}

impl SavingsConfig {
    /// Loads `path`, or the defaults if it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SavingsConfig::load(dir.path().join("config.json")).unwrap();
        assert_eq!(config, SavingsConfig::default());
        assert_eq!(config.initial_tab, Category::Gas);
        assert_eq!(config.reference_monthly_cost, 95.0);
        assert_eq!(config.favorites_key, "elkin-favorites");
        assert_eq!(config.events.len(), 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"initial_tab": "dining", "gas": {"source": "prices"}}"#).unwrap();

        let config = SavingsConfig::load(&path).unwrap();
        assert_eq!(config.initial_tab, Category::Dining);
        assert_eq!(config.gas.source, GasSource::Prices);
        assert_eq!(config.recalc_delay_ms, 100);
        assert_eq!(config.weather_interval_secs, 3600);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = SavingsConfig::default();
        config.initial_tab = Category::Grocery;
        config.session_store = Some(dir.path().join("session.json"));

        config.save(&path).unwrap();
        assert_eq!(SavingsConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "plan = pro").unwrap();
        assert!(SavingsConfig::load(&path).is_err());
    }
}
