//! Errors raised while reading or writing a sequence on disk.

use std::path::PathBuf;

use lapse_common::LapseError;

/// Errors that can occur when working with settings files and sequences.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path} at line {line}: {message}")]
    ParseError {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid value in {path}: [{section}] {key}={value} is not {expected}")]
    InvalidValue {
        path: PathBuf,
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl SettingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

impl From<SettingsError> for LapseError {
    fn from(err: SettingsError) -> Self {
        LapseError::settings(err.to_string())
    }
}
