//! Camera provider contract.

use async_trait::async_trait;

use acam_models::FacingMode;

use crate::error::CaptureResult;
use crate::stream::CameraStream;

/// Asynchronous source of camera streams.
///
/// Implementations wrap the platform media-capture subsystem. The returned
/// future must not resolve until the stream's intrinsic resolution is known;
/// callers trust `resolution()` immediately after `open` succeeds.
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Open a stream for the given facing mode.
    async fn open(&self, facing: FacingMode) -> CaptureResult<Box<dyn CameraStream>>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
