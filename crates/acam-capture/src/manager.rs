//! Capture manager: exclusive owner of the active camera stream.

use std::sync::Arc;

use tracing::{debug, info};

use acam_models::FacingMode;

use crate::error::CaptureResult;
use crate::provider::CameraProvider;
use crate::stream::StreamHandle;

/// Owns at most one live camera stream at a time.
///
/// Acquiring a new stream always stops the previous one first, so a failed
/// switch never leaves two cameras held open. Nothing outside the manager
/// mutates the handle.
pub struct CaptureManager {
    provider: Arc<dyn CameraProvider>,
    active: Option<StreamHandle>,
}

impl CaptureManager {
    /// Create a manager over a camera provider.
    pub fn new(provider: Arc<dyn CameraProvider>) -> Self {
        Self {
            provider,
            active: None,
        }
    }

    /// Acquire a stream for the given facing mode.
    ///
    /// Any previously active stream is stopped and cleared before the
    /// provider is asked for a new one; on failure the manager is left with
    /// no active stream.
    pub async fn acquire(&mut self, facing: FacingMode) -> CaptureResult<&StreamHandle> {
        self.release();

        debug!(provider = self.provider.name(), %facing, "Acquiring camera");
        let stream = self.provider.open(facing).await?;

        // Mirroring gives the natural selfie view; rear cameras show the
        // scene as-is.
        let mirror = facing == FacingMode::User;
        let handle = StreamHandle::new(stream, mirror);
        info!(
            %facing,
            resolution = %handle.resolution(),
            mirror,
            "Camera acquired"
        );

        self.active = Some(handle);
        Ok(self.active.as_ref().expect("stream was just stored"))
    }

    /// Stop and clear the active stream. Safe to call with none active.
    pub fn release(&mut self) {
        if let Some(mut handle) = self.active.take() {
            info!(facing = %handle.facing(), "Releasing camera");
            handle.stop();
        }
    }

    /// The active stream, if any.
    pub fn active(&self) -> Option<&StreamHandle> {
        self.active.as_ref()
    }

    /// Mutable access to the active stream (frame grabbing, playback).
    pub fn active_mut(&mut self) -> Option<&mut StreamHandle> {
        self.active.as_mut()
    }

    /// Whether a live stream is currently held.
    pub fn has_live_stream(&self) -> bool {
        self.active.as_ref().is_some_and(|s| s.is_live())
    }
}

impl Drop for CaptureManager {
    fn drop(&mut self) {
        self.release();
    }
}
