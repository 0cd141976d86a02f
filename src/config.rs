use crate::model::table::DEFAULT_ROWS_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the config/data directory
pub const HOME_ENV: &str = "TABULA_HOME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where snapshots and logs live; defaults to the config directory
    pub data_dir: Option<PathBuf>,
    /// Where CSV exports are written; defaults to the working directory
    pub export_dir: Option<PathBuf>,
    /// Page size for a fresh table
    pub default_rows_per_page: usize,
    /// Write a snapshot after every change
    pub persist: bool,
    /// Show duplicate column keys and invalid cell input as errors
    pub report_rejections: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_dir: None,
            default_rows_per_page: DEFAULT_ROWS_PER_PAGE,
            persist: true,
            report_rejections: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(dir) = env::var(HOME_ENV) {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir));
            }
        }
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".tabula"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Directory for snapshots and logs
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(Self::config_dir)
            .unwrap_or_else(|| PathBuf::from(".tabula"))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Page size for new tables, never zero
    pub fn rows_per_page(&self) -> usize {
        if self.default_rows_per_page == 0 {
            DEFAULT_ROWS_PER_PAGE
        } else {
            self.default_rows_per_page
        }
    }
}
