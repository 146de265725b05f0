use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::paths::ProjectPaths;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to `<data dir>/logs/<component>.log`
    #[serde(default)]
    pub file: bool,

    /// Default filter when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: false,
            level: default_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Consult the negotiated capability mask before delivering NPC events
    #[serde(default = "default_skip_unhandled")]
    pub skip_unhandled: bool,
}

fn default_skip_unhandled() -> bool {
    true
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            skip_unhandled: default_skip_unhandled(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,
}

pub const EXAMPLE_CONFIG: &str = r#"# gscript configuration

[logging]
# Write logs to a file in the data directory as well as the console
file = false
# Default log filter, overridden by RUST_LOG
level = "info"

[dispatch]
# Skip NPC events the NPC did not declare a callback for
skip_unhandled = true
"#;

impl RunnerConfig {
    /// Default location: `<config dir>/config.toml`
    pub fn config_path() -> PathBuf {
        ProjectPaths::new("gscript")
            .map(|paths| paths.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("gscript.toml"))
    }

    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigLoadError> {
        if !path.exists() {
            return Err(ConfigLoadError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigLoadError> {
        match Self::load_from(path) {
            Err(ConfigLoadError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigLoadError> {
        let content = toml::to_string_pretty(self)?;
        write_file(path, &content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Write the commented example config to `path`
    pub fn write_example(path: &Path) -> Result<(), ConfigLoadError> {
        write_file(path, EXAMPLE_CONFIG)?;
        info!("Created example config at {}", path.display());
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ConfigLoadError> {
    let io_error = |source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, content).map_err(io_error)
}
