//! Camera stream and track contracts.

use std::sync::Arc;

use acam_models::{FacingMode, Resolution, VideoFrame};

use crate::error::{CaptureResult, PlaybackError};

/// One underlying media track of a stream.
///
/// Stopping a track is idempotent and permanent; a stopped track never
/// reports live again.
pub trait MediaTrack: Send + Sync {
    /// Track kind for logging, e.g. "video".
    fn kind(&self) -> &'static str;

    /// Whether the track is still delivering media.
    fn is_live(&self) -> bool;

    /// Stop the track and release its device resources.
    fn stop(&self);
}

/// Shared handle to a stream track.
pub type TrackHandle = Arc<dyn MediaTrack>;

/// An active camera capture, produced by a [`CameraProvider`].
///
/// The provider resolves `open` only once the intrinsic resolution has been
/// negotiated, so `resolution()` is trustworthy from the first call. It may
/// still change mid-session if the device renegotiates; callers re-read it
/// every cycle.
///
/// [`CameraProvider`]: crate::provider::CameraProvider
pub trait CameraStream: Send {
    /// The facing mode this stream was opened with.
    fn facing(&self) -> FacingMode;

    /// Current intrinsic resolution.
    fn resolution(&self) -> Resolution;

    /// Whether the stream is still delivering frames (all tracks live,
    /// source not ended).
    fn is_live(&self) -> bool;

    /// Grab the current frame for perception.
    fn grab_frame(&mut self) -> CaptureResult<VideoFrame>;

    /// Begin playback. Distinct from acquisition: autoplay policy can block
    /// playback on an otherwise healthy stream.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// The underlying tracks.
    fn tracks(&self) -> Vec<TrackHandle>;
}

/// An acquired stream plus its presentation hints, owned by the
/// [`CaptureManager`](crate::manager::CaptureManager).
pub struct StreamHandle {
    stream: Box<dyn CameraStream>,
    mirror: bool,
}

impl StreamHandle {
    pub(crate) fn new(stream: Box<dyn CameraStream>, mirror: bool) -> Self {
        Self { stream, mirror }
    }

    /// Whether the display should horizontally flip the video. Presentation
    /// only; detection always runs on the unmirrored raw frame.
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    pub fn facing(&self) -> FacingMode {
        self.stream.facing()
    }

    pub fn resolution(&self) -> Resolution {
        self.stream.resolution()
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_live()
    }

    pub fn grab_frame(&mut self) -> CaptureResult<VideoFrame> {
        self.stream.grab_frame()
    }

    pub fn play(&mut self) -> Result<(), PlaybackError> {
        self.stream.play()
    }

    /// Stop every track of the stream.
    pub(crate) fn stop(&mut self) {
        for track in self.stream.tracks() {
            track.stop();
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle")
            .field("facing", &self.stream.facing())
            .field("resolution", &self.stream.resolution())
            .field("mirror", &self.mirror)
            .finish()
    }
}
