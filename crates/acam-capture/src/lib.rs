//! Camera stream lifecycle management for AnnoCam.
//!
//! The [`CaptureManager`] is the exclusive owner of the active camera
//! stream: it acquires streams through a [`CameraProvider`], enforces the
//! at-most-one-live-stream invariant, and releases device resources on
//! stop, switch, or failure.

pub mod error;
pub mod manager;
pub mod provider;
pub mod stream;

pub use error::{CameraError, CaptureResult, PlaybackError};
pub use manager::CaptureManager;
pub use provider::CameraProvider;
pub use stream::{CameraStream, MediaTrack, StreamHandle, TrackHandle};
