//! Perception provider traits.
//!
//! These traits give the detection loop a uniform interface over the two
//! pretrained models. Implementations are opaque asynchronous capability
//! providers; the engine never inspects model internals.

use std::sync::Arc;

use async_trait::async_trait;

use acam_models::{FaceObservation, ObjectObservation, VideoFrame};

use crate::error::{ModelLoadError, PerceptionResult};

/// General object detection provider.
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    /// Detect objects in a frame.
    ///
    /// # Returns
    /// Observations in source-pixel coordinates.
    async fn detect(&self, frame: &VideoFrame) -> PerceptionResult<Vec<ObjectObservation>>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Face detection provider.
#[async_trait]
pub trait FaceDetector: Send + Sync {
    /// Estimate faces in a frame.
    ///
    /// `flip_horizontal` must be `false` in this engine: detection always
    /// runs on the unmirrored raw frame, mirroring is a display concern.
    async fn estimate_faces(
        &self,
        frame: &VideoFrame,
        flip_horizontal: bool,
    ) -> PerceptionResult<Vec<FaceObservation>>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Asynchronous loader for an object detector.
#[async_trait]
pub trait LoadObjectDetector: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn ObjectDetector>, ModelLoadError>;
}

/// Asynchronous loader for a face detector.
#[async_trait]
pub trait LoadFaceDetector: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn FaceDetector>, ModelLoadError>;
}
