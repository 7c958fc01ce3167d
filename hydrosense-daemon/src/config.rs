//! Hydrosense configuration loading from `hydrosense.toml`.
//!
//! Configuration is optional. Every section and key falls back to a default,
//! and command-line flags override whatever the file says.
//!
//! # Example Configuration
//!
//! ```toml
//! [network]
//! elevation_threshold = 100.0
//! junction_section = "JUNCTIONS"
//! pipe_section = "PIPES"
//!
//! [server]
//! port = 8080
//! max_upload_mb = 32
//! upload_dir = "/var/tmp/hydrosense"
//! ```

use hydrosense_core::graph::{JUNCTIONS_SECTION, PIPES_SECTION};
use hydrosense_core::{LoaderOptions, DEFAULT_ELEVATION_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default file name looked up in the working directory.
pub const CONFIG_FILE: &str = "hydrosense.toml";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Errors raised when a config file exists but cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Root configuration structure loaded from `hydrosense.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct HydrosenseConfig {
    /// How network files are turned into a graph.
    #[serde(default)]
    pub network: NetworkConfig,

    /// HTTP daemon settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Network loading settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Junctions with elevation strictly above this are dropped.
    #[serde(default = "default_threshold")]
    pub elevation_threshold: f64,

    /// Section holding junction elevations.
    #[serde(default = "default_junction_section")]
    pub junction_section: String,

    /// Section holding pipe connections.
    #[serde(default = "default_pipe_section")]
    pub pipe_section: String,
}

fn default_threshold() -> f64 {
    DEFAULT_ELEVATION_THRESHOLD
}

fn default_junction_section() -> String {
    JUNCTIONS_SECTION.to_string()
}

fn default_pipe_section() -> String {
    PIPES_SECTION.to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            elevation_threshold: default_threshold(),
            junction_section: default_junction_section(),
            pipe_section: default_pipe_section(),
        }
    }
}

impl NetworkConfig {
    /// Loader options, with an optional threshold override.
    pub fn loader_options(&self, threshold: Option<f64>) -> LoaderOptions {
        LoaderOptions {
            elevation_threshold: threshold.unwrap_or(self.elevation_threshold),
            junction_section: self.junction_section.clone(),
            pipe_section: self.pipe_section.clone(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, in megabytes.
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,

    /// Directory for temporary upload files (system temp dir if unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_dir: Option<PathBuf>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_upload_mb() -> usize {
    32
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            max_upload_mb: default_max_upload_mb(),
            upload_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl HydrosenseConfig {
    /// Load configuration, failing if the file exists but is unreadable or invalid.
    ///
    /// A missing file yields the defaults.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration, falling back to defaults with a warning on any error.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Render as TOML, e.g. for `hydrosense init`.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
