//! Configuration loading
//!
//! Resolution order:
//! 1. Environment variable (store location is only ever taken from here)
//! 2. TOML config file named by `LGU_CONFIG`
//! 3. Compiled defaults

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the record store location
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable naming an optional TOML settings file
pub const CONFIG_PATH_ENV: &str = "LGU_CONFIG";

/// Tunable settings for the mapping check
///
/// Every field has a compiled default; a TOML file may override any subset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Table holding poem rows
    pub poem_table: String,
    /// Table holding chapter/combination → poem mapping rows
    pub mapping_table: String,
    /// Number of mapping rows shown in the preview
    pub preview_rows: usize,
    /// Number of poems sampled for the body report
    pub sample_size: u32,
    /// Characters of poem body shown in the preview
    pub preview_chars: usize,
    /// SQLite busy timeout (milliseconds)
    pub busy_timeout_ms: u64,
    /// Default log level when RUST_LOG is unset
    pub log_level: String,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            poem_table: "ZhouPoem".to_string(),
            mapping_table: "ZhouMapping".to_string(),
            preview_rows: 5,
            sample_size: 3,
            preview_chars: 50,
            busy_timeout_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}

impl CheckSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: CheckSettings = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject values that would produce invalid SQL or an empty sample
    pub fn validate(&self) -> Result<()> {
        validate_table_name(&self.poem_table)?;
        validate_table_name(&self.mapping_table)?;
        if self.sample_size == 0 {
            return Err(Error::Config("sample_size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Table names are interpolated into SQL, so only plain identifiers pass
pub fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::Config(format!("Invalid table name: {:?}", name)))
    }
}

/// Fully resolved configuration for one mapping check run
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Store location exactly as supplied by the environment
    pub database_url: String,
    pub settings: CheckSettings,
}

/// Read the store location from the named environment variable
pub fn resolve_database_url(env_var_name: &str) -> Result<String> {
    match std::env::var(env_var_name) {
        Ok(url) if !url.trim().is_empty() => Ok(url),
        Ok(_) => Err(Error::Config(format!("{} is empty", env_var_name))),
        Err(_) => Err(Error::Config(format!("{} is not set", env_var_name))),
    }
}

/// Path of the optional settings file, if `LGU_CONFIG` names one
fn settings_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolve settings: TOML file when configured, compiled defaults otherwise
pub fn load_settings() -> Result<CheckSettings> {
    match settings_path() {
        Some(path) => {
            info!("Loading settings from {}", path.display());
            CheckSettings::from_file(&path)
        }
        None => {
            debug!("{} not set, using compiled defaults", CONFIG_PATH_ENV);
            Ok(CheckSettings::default())
        }
    }
}

/// Load the complete configuration for a mapping check
pub fn load_check_config() -> Result<CheckConfig> {
    let database_url = resolve_database_url(DATABASE_URL_ENV)?;
    let settings = load_settings()?;
    Ok(CheckConfig {
        database_url,
        settings,
    })
}
