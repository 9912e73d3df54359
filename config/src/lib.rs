use anyhow::Error;
use log::LevelFilter;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error as DError;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATA_DIR_VAR: &str = "BOOKSHELF_DATA_DIR";

#[derive(Debug, Clone, DError, PartialEq)]
pub enum ConfigError {
    #[error("No database url, set {} or database.url in the config file", DATABASE_URL_VAR)]
    MissingDatabaseUrl,

    #[error("Invalid log level ({0})")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PagerConfig {
    /// Rows assumed when the output isn't a terminal
    pub default_height: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self { default_height: 24 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding users.csv, books.csv and ratings.csv
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { dir: "data".into() }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub database: DatabaseConfig,
    pub pager: PagerConfig,
    pub data: DataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            database: DatabaseConfig::default(),
            pager: PagerConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: Self = toml::from_str(&contents)?;
        Ok(parsed)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Overlay values taken from environment variables
    pub fn apply_env(&mut self, vars: &HashMap<String, String>) {
        if let Some(url) = vars.get(DATABASE_URL_VAR) {
            log::debug!("Using database url from {}", DATABASE_URL_VAR);
            self.database.url = Some(url.clone());
        }

        if let Some(dir) = vars.get(DATA_DIR_VAR) {
            self.data.dir = dir.into();
        }
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
