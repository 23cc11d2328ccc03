//! Overlay rendering and coordinate scaling for AnnoCam.
//!
//! The [`FrameRenderer`] consumes one cycle's detections and draws outlined,
//! labeled boxes onto a [`DrawSurface`], scaling from source-frame pixel
//! coordinates to the surface's pixel size.

pub mod renderer;
pub mod scale;
pub mod surface;

pub use renderer::FrameRenderer;
pub use scale::scale_rect;
pub use surface::{Color, DrawSurface};
