//! Error types
//!
//! Insufficient per-frame data is not an error: detectors answer `Ok(None)`.
//! `DetectionError` is contained by the engine; `ConfigError` only comes
//! out of the JSON configuration entry points.

use thiserror::Error;

/// A detector could not evaluate this frame
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("non-finite {signal} (malformed landmark coordinates?)")]
    NonFiniteSignal { signal: &'static str },
}

/// Configuration input that could not be applied
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config patch must be a JSON object")]
    NotAnObject,
    #[error("unknown detector '{0}'")]
    UnknownDetector(String),
    #[error("unknown preset '{0}' (expected navigation, control or all)")]
    UnknownPreset(String),
}
