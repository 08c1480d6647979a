//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/movescreen/config.json`.
//! Every field is optional: a missing file or a minimal `{}` falls back to
//! the compiled-in defaults, and unknown keys are ignored.
//!
//! # Example
//!
//! ```json
//! {
//!   "topology": {
//!     "strategy": "scored",
//!     "order_y_weight": 8
//!   },
//!   "toggle_states": true
//! }
//! ```

use crate::topology::TopologyConfig;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How monitor neighbors are derived.
    pub topology: TopologyConfig,

    /// Toggle maximized/fullscreen states off before moving a window and
    /// back on afterwards.  Some window managers ignore geometry changes on
    /// maximized or fullscreen windows otherwise.
    pub toggle_states: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topology: TopologyConfig::default(),
            toggle_states: true,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Whether the file simply does not exist, as opposed to being
    /// unreadable or malformed.
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::Read { source, .. } if source.kind() == ErrorKind::NotFound)
    }
}
