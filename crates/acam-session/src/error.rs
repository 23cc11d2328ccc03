//! Session error types.

use thiserror::Error;

use acam_capture::{CameraError, PlaybackError};
use acam_perception::{ModelLoadError, PerceptionError};

pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the session orchestrator.
///
/// Every variant renders to human-readable status text; startup errors leave
/// the session in a retryable not-started state, cycle errors are fail-stop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Model load error: {0}")]
    ModelLoad(#[from] ModelLoadError),

    #[error("Perception error: {0}")]
    Perception(#[from] PerceptionError),

    #[error("Detection cycle failed: {0}")]
    CycleFailed(String),

    #[error("Loop start refused: {0}")]
    StartRefused(String),
}

impl SessionError {
    pub fn cycle_failed(msg: impl Into<String>) -> Self {
        Self::CycleFailed(msg.into())
    }

    pub fn start_refused(msg: impl Into<String>) -> Self {
        Self::StartRefused(msg.into())
    }

    /// Check if the user can simply retry `start` without changing anything
    /// (as opposed to fixing permissions or closing another app first).
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            SessionError::Camera(CameraError::PermissionDenied)
                | SessionError::Camera(CameraError::DeviceBusy)
        )
    }
}
