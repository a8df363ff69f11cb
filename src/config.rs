//! Run configuration
//!
//! Settings come from a TOML file (by default `jcc-enrich.toml` in the
//! working directory). Command-line flags are applied on top through
//! [`Overrides`]. Only the database path is mandatory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{EnrichError, Result};
use crate::registry::DEFAULT_REGISTRY_URL;

/// Config file looked up when no `--config` flag is given
pub const DEFAULT_CONFIG_FILE: &str = "jcc-enrich.toml";

/// JCC table looked up in the working directory by default
pub const DEFAULT_JCC_TABLE: &str = "jcc-list-utf8.csv";

/// Seconds to wait before each registry request
pub const DEFAULT_REQUEST_DELAY_SECS: u64 = 10;

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub jcc_table_path: PathBuf,
    pub registry_url: String,
    pub request_delay: Duration,
    /// Build the registry client for servers without secure renegotiation
    pub legacy_tls: bool,
    pub dry_run: bool,
}

/// On-disk layout of the TOML file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    database_path: Option<PathBuf>,
    jcc_table_path: Option<PathBuf>,
    registry_url: Option<String>,
    request_delay_secs: Option<u64>,
    legacy_tls: Option<bool>,
    dry_run: Option<bool>,
}

/// Values supplied on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub database_path: Option<PathBuf>,
    pub jcc_table_path: Option<PathBuf>,
    pub request_delay_secs: Option<u64>,
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] when
    /// `path` is `None`.
    ///
    /// An explicitly named file must exist. The default file may be absent,
    /// in which case everything has to come from `overrides`.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = match path {
            Some(p) => read_file(p)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    read_file(default)?
                } else {
                    log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    FileConfig::default()
                }
            }
        };
        Self::resolve(file, overrides)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str, overrides: &Overrides) -> Result<Self> {
        let file: FileConfig =
            toml::from_str(text).map_err(|e| EnrichError::Config(e.to_string()))?;
        Self::resolve(file, overrides)
    }

    fn resolve(file: FileConfig, overrides: &Overrides) -> Result<Self> {
        let database_path = overrides
            .database_path
            .clone()
            .or(file.database_path)
            .ok_or_else(|| {
                EnrichError::Config(
                    "database_path is not set (use --database or the config file)".to_string(),
                )
            })?;

        let jcc_table_path = overrides
            .jcc_table_path
            .clone()
            .or(file.jcc_table_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JCC_TABLE));

        let delay_secs = overrides
            .request_delay_secs
            .or(file.request_delay_secs)
            .unwrap_or(DEFAULT_REQUEST_DELAY_SECS);

        Ok(Self {
            database_path,
            jcc_table_path,
            registry_url: file
                .registry_url
                .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string()),
            request_delay: Duration::from_secs(delay_secs),
            legacy_tls: file.legacy_tls.unwrap_or(true),
            dry_run: overrides.dry_run || file.dry_run.unwrap_or(false),
        })
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| EnrichError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&text)
        .map_err(|e| EnrichError::Config(format!("invalid {}: {}", path.display(), e)))
}
