//! Configuration for the reference host program
//!
//! The host reads an optional config file and lets command line flags
//! override it. Both TOML and JSON are accepted; the format is chosen by
//! file extension (`.json` for JSON, anything else is read as TOML).
//!
//! # Example
//!
//! ```toml
//! context = 10.0
//! log_filter = "info,calc_graph=debug"
//! print_snapshot = true
//! print_report = false
//! ```

use crate::error::{CalcGraphError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default starting value of the shared context
pub const DEFAULT_CONTEXT: f64 = 10.0;

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,calc_graph=debug";

/// Host program configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Initial value of the shared `f64` context
    pub context: f64,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Print the assembled pipeline before running it
    pub print_snapshot: bool,

    /// Print per-node timings after the run
    pub print_report: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            context: DEFAULT_CONTEXT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            print_snapshot: false,
            print_report: false,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl HostConfig {
    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(CalcGraphError::from)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        if is_json(path) {
            serde_json::from_str(&content).map_err(|e| {
                CalcGraphError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })
        } else {
            toml::from_str(&content).map_err(|e| {
                CalcGraphError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })
        }
    }

    /// Load a config file, returning defaults if any error occurs
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config, in the format matching the file extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(CalcGraphError::from)
                    .context("Failed to create config directory")?;
            }
        }

        let content = if is_json(path) {
            serde_json::to_string_pretty(self)
                .map_err(|e| CalcGraphError::Serialization(e.to_string()))?
        } else {
            toml::to_string_pretty(self)
                .map_err(|e| CalcGraphError::Serialization(e.to_string()))?
        };

        std::fs::write(path, content)
            .map_err(CalcGraphError::from)
            .with_context(|| format!("Failed to write config file {:?}", path))
    }

    pub fn with_context(mut self, context: f64) -> Self {
        self.context = context;
        self
    }
}
