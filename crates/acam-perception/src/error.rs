//! Error types for model loading and inference.

use thiserror::Error;

/// Result type for perception provider calls.
pub type PerceptionResult<T> = Result<T, PerceptionError>;

/// Errors loading a perception model.
///
/// Clonable so a single in-flight load can report the same failure to every
/// concurrent waiter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelLoadError {
    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Model load failed: {0}")]
    LoadFailed(String),
}

impl ModelLoadError {
    /// Create a model not found error.
    pub fn not_found(model: impl Into<String>) -> Self {
        Self::NotFound(model.into())
    }

    /// Create a load failure error.
    pub fn load_failed(message: impl Into<String>) -> Self {
        Self::LoadFailed(message.into())
    }
}

/// Errors during an inference call on a loaded provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PerceptionError {
    #[error("Inference failed: {0}")]
    Inference(String),
}

impl PerceptionError {
    /// Create an inference failure error.
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }
}
