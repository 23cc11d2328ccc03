//! Error types for camera acquisition and playback.

use thiserror::Error;

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CameraError>;

/// Errors reported by the camera provider or the capture manager.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("No camera found for the requested facing mode")]
    NotFound,

    #[error("Camera is in use by another application")]
    DeviceBusy,

    #[error("Camera error: {0}")]
    Other(String),
}

impl CameraError {
    /// Create a generic camera error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Check if acquiring the opposite facing mode is worth a single retry.
    ///
    /// Permission denials and device-exclusivity conflicts affect every
    /// camera equally, so falling back would only fail again (or prompt the
    /// user twice).
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(self, CameraError::NotFound | CameraError::Other(_))
    }
}

/// Errors starting video playback on an acquired stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("Playback blocked by autoplay policy")]
    AutoplayBlocked,

    #[error("Playback failed: {0}")]
    Other(String),
}

impl PlaybackError {
    /// Create a generic playback error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
