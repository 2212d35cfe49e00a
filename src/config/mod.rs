//! Planner configuration, data directory resolution, and seed data.

pub mod seed;

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigError,
    utils::fs::{tmp_path, write_atomic},
};

pub use seed::{PlannerSeed, PrepSection, DECISION_MAKER_ROLE};

/// Environment variable overriding the application data directory.
pub const HOME_ENV: &str = "BIRTH_PREP_HOME";

const DEFAULT_DIR_NAME: &str = ".birth_prep";
const CONFIG_FILE: &str = "config.json";
const STORE_DIR: &str = "store";
const DEFAULT_RETENTION: usize = 5;

/// Returns the application data directory, defaulting to `~/.birth_prep`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// User-adjustable planner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional directory for persisted plan state. Defaults to `<home>/store`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "PlannerConfig::default_backup_retention")]
    pub backup_retention: usize,
    #[serde(default = "PlannerConfig::default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            backup_retention: Self::default_backup_retention(),
            currency_symbol: Self::default_currency_symbol(),
        }
    }
}

impl PlannerConfig {
    pub fn default_backup_retention() -> usize {
        DEFAULT_RETENTION
    }

    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    /// Directory holding the persisted plan, relative to `home` unless overridden.
    pub fn resolve_data_dir(&self, home: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => home.join(STORE_DIR),
        }
    }

    /// Formats an amount with the configured currency symbol and two decimals.
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

/// Loads and saves [`PlannerConfig`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    home: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at [`app_data_dir`].
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        let path = base.join(CONFIG_FILE);
        Ok(Self { home: base, path })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<PlannerConfig, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(PlannerConfig::default())
        }
    }

    pub fn save(&self, config: &PlannerConfig) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
