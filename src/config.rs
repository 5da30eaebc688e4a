use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::database::DEFAULT_DATABASE_PATH;

pub const REGIONS_FILE: &str = "noc_regions.csv";
pub const EVENTS_FILE: &str = "paralympic_events.csv";

/// Server settings. Read from an optional TOML file, then overridden by CLI flags.
///
/// ```toml
/// port = 8080
/// database = "/var/lib/paralympics/paralympics.sqlite"
/// data_dir = "/usr/share/paralympics"
/// cors_origin = "http://localhost:8050"
/// seed = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub port: u16,
    pub database: String,
    /// Directory holding the two seed CSV files
    pub data_dir: PathBuf,
    /// Allowed CORS origin; any origin when unset or "*"
    pub cors_origin: Option<String>,
    /// Fill empty tables from the seed files at startup
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            database: DEFAULT_DATABASE_PATH.to_string(),
            data_dir: PathBuf::from("data"),
            cors_origin: None,
            seed: true,
        }
    }
}

impl ServerConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid server configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn regions_csv(&self) -> PathBuf {
        self.data_dir.join(REGIONS_FILE)
    }

    pub fn events_csv(&self) -> PathBuf {
        self.data_dir.join(EVENTS_FILE)
    }
}
