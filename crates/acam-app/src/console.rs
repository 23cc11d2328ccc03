//! Overlay surface that reports draws through tracing instead of pixels.

use tracing::{debug, trace};

use acam_models::{PixelRect, Resolution};
use acam_render::{Color, DrawSurface};

/// Logs drawing primitives; the "display" is the log stream.
pub struct ConsoleSurface {
    size: Resolution,
    frames: u64,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self {
            size: Resolution::new(0, 0),
            frames: 0,
        }
    }
}

impl Default for ConsoleSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for ConsoleSurface {
    fn set_size(&mut self, size: Resolution) {
        debug!(%size, "Surface resized");
        self.size = size;
    }

    fn size(&self) -> Resolution {
        self.size
    }

    fn clear(&mut self) {
        self.frames += 1;
        trace!(frame = self.frames, "Surface cleared");
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Color) {
        debug!(
            frame = self.frames,
            x = rect.x,
            y = rect.y,
            w = rect.width,
            h = rect.height,
            r = color.r,
            g = color.g,
            b = color.b,
            "Box"
        );
    }

    fn fill_rect(&mut self, _rect: PixelRect, _color: Color) {}

    fn draw_text(&mut self, text: &str, _x: f64, _y: f64, _color: Color) {
        debug!(frame = self.frames, label = text, "Label");
    }
}
