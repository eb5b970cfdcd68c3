use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::state::Timing;
use crate::state::UiTheme;
use crate::transcript::DEFAULT_TRANSCRIPT_CAPACITY;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub timing: Timing,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: UiTheme,
    pub skip_welcome: bool,
    pub matrix_rain: bool,
    pub transcript_capacity: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Matrix,
            skip_welcome: false,
            matrix_rain: true,
            transcript_capacity: DEFAULT_TRANSCRIPT_CAPACITY,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        if let Some(field) = config.timing.zero_interval() {
            return Err(ConfigError::ZeroInterval {
                path: origin.to_path_buf(),
                field,
            });
        }
        Ok(config)
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml_str(&raw, path)
    }
}
