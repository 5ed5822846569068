#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for cyget
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/cyget/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary on top of the result)

pub mod constants;

use constants::{
    CATALOG_FILE_NAME, DEFAULT_MIRROR, DEFAULT_PARALLEL_DOWNLOADS, DEFAULT_TARGET_DIR,
    DEFAULT_VERSION_SPEC,
};
use cyget_errors::{ConfigError, Error};
use cyget_types::ColorChoice;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub paths: PathConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
    #[serde(default = "default_parallel_downloads")]
    pub parallel_downloads: usize,
    #[serde(default = "default_version_spec")]
    pub version_spec: String,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_mirror")]
    pub mirror: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64, // seconds
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    pub target_dir: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            parallel_downloads: DEFAULT_PARALLEL_DOWNLOADS,
            version_spec: DEFAULT_VERSION_SPEC.to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            mirror: DEFAULT_MIRROR.to_string(),
            timeout: 300, // 5 minutes
            connect_timeout: 30,
            retries: 3,
            retry_delay: 1,
        }
    }
}

// Default value functions for serde
fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_parallel_downloads() -> usize {
    DEFAULT_PARALLEL_DOWNLOADS
}

fn default_version_spec() -> String {
    DEFAULT_VERSION_SPEC.to_string()
}

fn default_mirror() -> String {
    DEFAULT_MIRROR.to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("cyget").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // CYGET_MIRROR
        if let Ok(mirror) = std::env::var("CYGET_MIRROR") {
            if mirror.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "CYGET_MIRROR".to_string(),
                    value: mirror,
                }
                .into());
            }
            self.network.mirror = mirror;
        }

        // CYGET_TARGET_DIR
        if let Ok(dir) = std::env::var("CYGET_TARGET_DIR") {
            self.paths.target_dir = Some(PathBuf::from(dir));
        }

        // CYGET_VERSION_SPEC
        if let Ok(spec) = std::env::var("CYGET_VERSION_SPEC") {
            self.general.version_spec = spec;
        }

        // CYGET_COLOR
        if let Ok(color) = std::env::var("CYGET_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "CYGET_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // CYGET_PARALLEL_DOWNLOADS
        if let Ok(downloads) = std::env::var("CYGET_PARALLEL_DOWNLOADS") {
            self.general.parallel_downloads = downloads
                .parse()
                .ok()
                .filter(|n: &usize| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    field: "CYGET_PARALLEL_DOWNLOADS".to_string(),
                    value: downloads,
                })?;
        }

        Ok(())
    }

    /// Reject values that would leave the client unusable
    ///
    /// # Errors
    ///
    /// Returns an error for a zero worker count or an empty mirror.
    pub fn validate(&self) -> Result<(), Error> {
        if self.general.parallel_downloads == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.parallel_downloads".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.network.mirror.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "network.mirror must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Get the target directory (with default)
    #[must_use]
    pub fn target_dir(&self) -> PathBuf {
        self.paths
            .target_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET_DIR))
    }

    /// Local catalog location inside the target directory
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.target_dir().join(CATALOG_FILE_NAME)
    }
}
