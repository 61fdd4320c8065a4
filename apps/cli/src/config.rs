//! # App Configuration
//!
//! Configuration for the `folio` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --catalog ./shop.txt                                               │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     FOLIO_CATALOG_PATH=./shop.txt                                      │
//! │     FOLIO_LOW_STOCK_THRESHOLD=3                                        │
//! │     FOLIO_MISSING_FILE=error                                           │
//! │     FOLIO_LOG=debug                                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/folio/folio.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.folio.folio/folio.toml (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! path = "/srv/shop/catalog.txt"
//! missing_file = "empty"  # empty | error
//! strict = false
//!
//! [report]
//! low_stock_threshold = 5
//!
//! [logging]
//! filter = "info"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use folio_core::DEFAULT_LOW_STOCK_THRESHOLD;
use folio_store::{MissingFile, StoreConfig};

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where the catalog lives and how it is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub missing_file: MissingFile,

    /// Fail the load on the first malformed record.
    #[serde(default)]
    pub strict: bool,
}

fn default_catalog_path() -> PathBuf {
    ProjectDirs::from("com", "folio", "folio")
        .map(|dirs| dirs.data_dir().join("catalog.txt"))
        .unwrap_or_else(|| PathBuf::from("catalog.txt"))
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            path: default_catalog_path(),
            missing_file: MissingFile::default(),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
}

fn default_low_stock_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins over it.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() || explicit {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    ///
    /// Used when no config file was named explicitly, so a broken platform
    /// config file does not lock the user out of the catalog.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document; absent sections take their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.catalog.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "catalog.path".into(),
                reason: "must not be empty".into(),
            });
        }

        if self.report.low_stock_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                key: "report.low_stock_threshold".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(())
    }

    /// Applies `FOLIO_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("FOLIO_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = PathBuf::from(path);
        }

        if let Some(policy) = lookup("FOLIO_MISSING_FILE") {
            match policy.parse() {
                Ok(parsed) => self.catalog.missing_file = parsed,
                Err(e) => warn!("Ignoring FOLIO_MISSING_FILE: {}", e),
            }
        }

        if let Some(threshold) = lookup("FOLIO_LOW_STOCK_THRESHOLD") {
            match threshold.trim().parse::<u32>() {
                Ok(t) => self.report.low_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Ignoring FOLIO_LOW_STOCK_THRESHOLD"),
            }
        }

        if let Some(filter) = lookup("FOLIO_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Store settings derived from the `[catalog]` section.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.catalog.path.clone())
            .missing_file(self.catalog.missing_file)
            .strict(self.catalog.strict)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "folio", "folio").map(|dirs| dirs.config_dir().join("folio.toml"))
    }
}
