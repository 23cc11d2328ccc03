//! Perception provider contracts and model hosting for AnnoCam.
//!
//! The [`ModelHost`] owns lazily-loaded handles to the two perception
//! providers (object detector, face detector) behind the trait seams in
//! [`provider`]. Loading is parallel, idempotent, and shared across
//! concurrent callers.

pub mod error;
pub mod host;
pub mod provider;

pub use error::{ModelLoadError, PerceptionError, PerceptionResult};
pub use host::ModelHost;
pub use provider::{FaceDetector, LoadFaceDetector, LoadObjectDetector, ObjectDetector};
