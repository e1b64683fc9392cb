//! Error types shared across Gazerig crates.

use std::path::PathBuf;

/// Top-level error type for Gazerig operations.
#[derive(Debug, thiserror::Error)]
pub enum GazerigError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Rig node not found: {name}")]
    MissingNode { name: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Rig error: {message}")]
    Rig { message: String },

    #[error("Simulation error: {message}")]
    Simulation { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GazerigError.
pub type GazerigResult<T> = Result<T, GazerigError>;

impl GazerigError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// A configuration error tied to a specific dotted field path.
    pub fn invalid_field(field: &str, msg: impl std::fmt::Display) -> Self {
        Self::config(format!("{field}: {msg}"))
    }

    pub fn missing_node(name: impl Into<String>) -> Self {
        Self::MissingNode { name: name.into() }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn rig(msg: impl Into<String>) -> Self {
        Self::Rig {
            message: msg.into(),
        }
    }

    pub fn simulation(msg: impl Into<String>) -> Self {
        Self::Simulation {
            message: msg.into(),
        }
    }
}
