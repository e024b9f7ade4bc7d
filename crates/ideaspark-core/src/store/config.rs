//! TOML-based application configuration.
//!
//! Holds knobs that are deliberately not part of the journaled state:
//! generation timeout and failure surfacing, the canned generator delay,
//! and the export directory. Stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Generation pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Seconds before a generator call is treated as failed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// When true, generation failures abort the save and are returned to
    /// the caller. Default preserves the original swallow-and-log policy.
    #[serde(default)]
    pub surface_errors: bool,
    /// Simulated latency of the canned generators, in milliseconds.
    #[serde(default = "default_canned_delay_ms")]
    pub canned_delay_ms: u64,
}

/// Export configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exports are written to. Defaults to the data directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_canned_delay_ms() -> u64 {
    1500
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            surface_errors: false,
            canned_delay_ms: default_canned_delay_ms(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("<data_dir>"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read a value by dotted key, as the CLI `config get` expects.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "generation.timeout_secs" => Ok(self.generation.timeout_secs.to_string()),
            "generation.surface_errors" => Ok(self.generation.surface_errors.to_string()),
            "generation.canned_delay_ms" => Ok(self.generation.canned_delay_ms.to_string()),
            "export.dir" => Ok(self
                .export
                .dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    /// Set a value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "generation.timeout_secs" => {
                self.generation.timeout_secs =
                    value.parse().map_err(|_| invalid("expected seconds".into()))?;
            }
            "generation.surface_errors" => {
                self.generation.surface_errors =
                    value.parse().map_err(|_| invalid("expected true or false".into()))?;
            }
            "generation.canned_delay_ms" => {
                self.generation.canned_delay_ms =
                    value.parse().map_err(|_| invalid("expected milliseconds".into()))?;
            }
            "export.dir" => {
                self.export.dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// All known keys with their current values.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        [
            "generation.timeout_secs",
            "generation.surface_errors",
            "generation.canned_delay_ms",
            "export.dir",
        ]
        .into_iter()
        .map(|key| (key, self.get(key).unwrap_or_default()))
        .collect()
    }
}
