//! Explorer settings.
//!
//! Read from a TOML file at startup. Every field has a default, so a missing
//! file or a partial one is fine; a file that exists but does not parse is
//! an error rather than being silently replaced by defaults.
//!
//! ```toml
//! search_debounce_ms = 300
//!
//! [client]
//! base_url = "https://api.salon.example/"
//! page_limit = 24
//!
//! [log]
//! level = "debug"
//! format = "compact"
//! ```

use std::path::Path;
use std::time::Duration;

use nsc_client::ClientSettings;
use serde::{Deserialize, Serialize};

use crate::debounce::DEFAULT_QUIET_WINDOW;
use crate::error::{ExplorerError, Result};
use crate::logging::LogConfig;

/// Explorer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
    /// Quiet window of the search debouncer, in milliseconds.
    pub search_debounce_ms: u64,

    /// Backend client settings.
    pub client: ClientSettings,

    /// Logging settings.
    pub log: LogConfig,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_QUIET_WINDOW.as_millis() as u64,
            client: ClientSettings::default(),
            log: LogConfig::default(),
        }
    }
}

impl ExplorerSettings {
    /// Load settings from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ExplorerError::SettingsIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| ExplorerError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The search quiet window.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
