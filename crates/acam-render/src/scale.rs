//! Pure coordinate scaling between source-frame and display coordinates.

use acam_models::{PixelRect, Resolution};

/// Map a rectangle from source-frame pixels to target-surface pixels.
///
/// Linear per axis: `scale = target / source`. When the resolutions match
/// the mapping is exactly identity. Callers must guard against an empty
/// source resolution before scaling; see
/// [`FrameRenderer::draw`](crate::renderer::FrameRenderer::draw).
pub fn scale_rect(rect: PixelRect, source: Resolution, target: Resolution) -> PixelRect {
    if source == target {
        return rect;
    }
    let sx = f64::from(target.width) / f64::from(source.width);
    let sy = f64::from(target.height) / f64::from(source.height);
    PixelRect::new(rect.x * sx, rect.y * sy, rect.width * sx, rect.height * sy)
}
