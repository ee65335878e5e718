//! Error types for rapid_textnorm
//!
//! This module defines the error types used throughout the library.
//! All errors are designed to be informative and actionable.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TextNormError>;

/// Main error type for rapid_textnorm
#[derive(Error, Debug)]
pub enum TextNormError {
    /// Stage or engine configuration is invalid (bad pattern, unknown
    /// engine component, out-of-range parameter)
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Adjacent stages declare incompatible input/output shapes.
    /// Caught when the pipeline is assembled, before any data flows.
    #[error("Incompatible stages: '{producer}' emits {emitted} but '{consumer}' expects {expected}")]
    IncompatibleStages {
        producer: String,
        consumer: String,
        emitted: &'static str,
        expected: &'static str,
    },

    /// A stage received an input of the wrong shape at run time.
    /// This is a contract violation by the caller; no coercion is attempted.
    #[error("Shape mismatch in stage '{stage}': expected {expected}, got {found}")]
    ShapeMismatch {
        stage: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Storage is configured but the persisted model artifact does not exist.
    /// Callers may catch this to fall back to an empty table.
    #[error("Missing model artifact: {path}")]
    MissingModelArtifact { path: String },

    /// Underlying I/O failure while reading or writing a model artifact
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Artifact serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The external NLP engine failed to analyze an input
    #[error("Engine error: {message}")]
    Engine { message: String },
}

impl TextNormError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a shape mismatch error for a named stage
    pub fn shape_mismatch(
        stage: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::ShapeMismatch {
            stage: stage.into(),
            expected,
            found,
        }
    }

    /// Create a missing artifact error
    pub fn missing_artifact(path: impl Into<String>) -> Self {
        Self::MissingModelArtifact { path: path.into() }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an engine error
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }

    /// Check if this error indicates a missing (but recoverable) artifact
    pub fn is_missing_artifact(&self) -> bool {
        matches!(self, Self::MissingModelArtifact { .. })
    }
}

impl From<regex::Error> for TextNormError {
    fn from(err: regex::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl From<bincode::Error> for TextNormError {
    fn from(err: bincode::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
