//! Error types for the analysis engine.

use thiserror::Error;

use crate::detect::Category;

/// Errors that can occur while configuring or running an analysis.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The annotation provider could not process the text. Not retried.
    #[error("annotation failed: {0}")]
    AnnotationFailure(String),
    /// The configuration was rejected before any analysis ran.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A single analyzer failed; the whole call fails with it.
    #[error("{category} analyzer failed: {message}")]
    AnalyzerFailure { category: Category, message: String },
    /// The analysis did not finish before the deadline.
    #[error("analysis timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration(msg.into())
    }

    pub(crate) fn analyzer(category: Category, msg: impl Into<String>) -> Self {
        EngineError::AnalyzerFailure {
            category,
            message: msg.into(),
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
