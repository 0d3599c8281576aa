//! Error types for the collaborators around the simulation core.
//!
//! The rules engine itself never fails. Everything here is recovered locally:
//! configuration problems fall back to defaults, audio problems are logged.

use std::fmt;
use std::path::PathBuf;

/// Failure while reading or interpreting a configuration source.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },
    /// A JSON configuration file did not deserialize.
    Json(serde_json::Error),
    /// A properties line had no key or no value. Logged and skipped.
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// A recognized key carried a value that is not a valid integer.
    InvalidValue {
        /// The configuration key.
        key: String,
        /// The raw value found in the source.
        value: String,
    },
    /// A value parsed but is outside the range the game accepts.
    OutOfRange {
        /// The configuration key.
        key: &'static str,
        /// The rejected value.
        value: u64,
        /// Smallest accepted value.
        min: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid JSON config: {err}"),
            Self::MalformedLine { line, text } => {
                write!(f, "malformed config line {line}: {text:?}")
            }
            Self::InvalidValue { key, value } => {
                write!(f, "config key {key} has non-integer value {value:?}")
            }
            Self::OutOfRange { key, value, min } => {
                write!(f, "config key {key}={value} is below the minimum of {min}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Failure reported by an [`AudioSink`](super::audio::AudioSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The requested clip is not loaded or does not exist.
    ClipUnavailable(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClipUnavailable(clip) => write!(f, "sound clip {clip:?} is unavailable"),
        }
    }
}

impl std::error::Error for AudioError {}
