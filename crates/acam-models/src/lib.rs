//! Shared data models for the AnnoCam annotation engine.
//!
//! This crate provides the plain types that flow between the capture,
//! perception, render, and session crates:
//! - Pixel rectangles and stream resolutions
//! - Raw provider observations and the normalized `Detection` union
//! - Camera facing modes
//! - Detection loop state
//! - Opaque video frame handles

pub mod detection;
pub mod facing;
pub mod frame;
pub mod loop_state;
pub mod rect;
pub mod resolution;

// Re-export common types
pub use detection::{Detection, FaceObservation, ObjectObservation};
pub use facing::{FacingMode, FacingModeParseError};
pub use frame::VideoFrame;
pub use loop_state::LoopState;
pub use rect::PixelRect;
pub use resolution::Resolution;
