//! Application configuration.

use std::path::{Path, PathBuf};

use lapse_model::{DriftMode, Easing, OutputResolution, ZoomAnchor, ZoomRange};
use serde::{Deserialize, Serialize};

use crate::error::{LapseError, LapseResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default run parameters, overridden by command-line flags.
    #[serde(default)]
    pub defaults: RunDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default parameters for an interpolation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDefaults {
    /// Vertical placement of the 16:9 crop.
    pub drift: DriftMode,

    /// Field-of-view range, e.g. `"100-70"`.
    pub zoom: ZoomRange,

    /// Point held fixed while zooming.
    pub anchor: ZoomAnchor,

    /// Easing applied to zoom progress.
    pub easing: Easing,

    /// Output resolution key.
    pub output: OutputResolution,

    /// Whether to back up existing settings files before writing.
    pub backup: bool,

    /// Raw file extensions that make up the sequence.
    pub raw_extensions: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "lapse_core=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            drift: DriftMode::Center,
            zoom: ZoomRange::NONE,
            anchor: ZoomAnchor::Center,
            easing: Easing::Linear,
            output: OutputResolution::Res4k,
            backup: true,
            raw_extensions: vec!["NEF".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`, falling back to defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Using default configuration");
                Self::default()
            }
        }
    }

    /// Load config from `path`. A missing file is `Ok(None)`.
    pub fn try_load_from(path: &Path) -> LapseResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            LapseError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| LapseError::config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("lapse").join("config.json")
}
