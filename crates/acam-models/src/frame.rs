use std::sync::Arc;

use crate::resolution::Resolution;

/// An opaque handle to one captured video frame.
///
/// Perception providers read the frame; nothing in the engine interprets the
/// pixel payload. The buffer is shared so the two providers of a cycle can
/// hold the same frame concurrently without copying.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    resolution: Resolution,
    data: Arc<[u8]>,
}

impl VideoFrame {
    /// Create a frame from a pixel buffer.
    pub fn new(resolution: Resolution, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            resolution,
            data: data.into(),
        }
    }

    /// Create a frame with no pixel payload, for providers that source
    /// their input elsewhere (or for tests).
    pub fn empty(resolution: Resolution) -> Self {
        Self {
            resolution,
            data: Arc::from(Vec::new()),
        }
    }

    /// Intrinsic resolution of the frame.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Raw pixel payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
