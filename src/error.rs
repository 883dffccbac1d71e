//! Unified error types for Pamoja.
//!
//! Validation rejections are not errors: a step that refuses to advance
//! reports an [`AdvanceOutcome::Rejected`](crate::core::AdvanceOutcome)
//! instead. The variants here cover misconfiguration caught at construction
//! time and the collaborators that sit around the core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Pamoja operations.
#[derive(Error, Debug)]
pub enum PamojaError {
    /// I/O errors while reading or writing configuration.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration loading or construction-time validation errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// JSON or TOML serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Operation not allowed in the current flow state.
    #[error("invalid state: {message}")]
    InvalidState { message: String },

    /// Lookup by identifier failed (lesson, avatar, milestone, profile...).
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// External collaborator failures (rewrite service, profile store).
    #[error("service error: {message}")]
    Service { message: String },
}

/// A specialized Result type for Pamoja operations.
pub type Result<T> = std::result::Result<T, PamojaError>;

impl PamojaError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a not found error for the given kind of thing.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a service error.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }
}

impl From<io::Error> for PamojaError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for PamojaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Used where a failure should degrade to a safe default instead of
/// stopping the user (a broken config file, a missing profile).
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the Pamoja CLI.
pub mod exit_codes {
    /// Command finished normally.
    pub const OK: i32 = 0;

    /// Command failed (bad arguments, unknown ids, broken config).
    pub const ERROR: i32 = 1;
}
