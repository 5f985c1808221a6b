//! Error types
//!
//! Stage errors are best-effort failures reported by the host; the controller
//! swallows them. Config and command errors surface to the binary.

use thiserror::Error;

use crate::types::FocusTarget;

/// Failure reported by a [`crate::core::Stage`] for a best-effort effect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    /// The environment refused to start audio without a user gesture
    #[error("autoplay blocked")]
    AutoplayBlocked,
    /// The media element rejected the play request
    #[error("playback rejected for page {page}: {detail}")]
    PlaybackRejected { page: usize, detail: String },
    /// The focus target cannot accept focus
    #[error("{0} is not focusable")]
    NotFocusable(FocusTarget),
}

/// Failure loading or validating a [`crate::config::PresentationConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure parsing one command line of the terminal host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("page {index} is out of range (0..{count})")]
    PageOutOfRange { index: usize, count: usize },
    #[error("line {line}: {message}")]
    AtLine { line: usize, message: String },
}
