//! Frame renderer: draws one cycle's detections onto the overlay surface.

use tracing::trace;

use acam_models::{Detection, PixelRect, Resolution};

use crate::scale::scale_rect;
use crate::surface::{Color, DrawSurface};

/// Label bar height in surface pixels.
const LABEL_HEIGHT: f64 = 18.0;
/// Approximate glyph advance used to size label backgrounds.
const LABEL_CHAR_WIDTH: f64 = 8.0;
const LABEL_PAD: f64 = 4.0;

/// Draws detection overlays, scaling source-frame coordinates to the
/// surface.
///
/// Exclusive owner of the surface: each `draw` clears the previous frame's
/// overlay, then paints all object detections followed by all face
/// detections, never interleaved. Degenerate boxes are skipped silently.
pub struct FrameRenderer {
    surface: Box<dyn DrawSurface>,
}

impl FrameRenderer {
    /// Create a renderer over a surface.
    pub fn new(surface: Box<dyn DrawSurface>) -> Self {
        Self { surface }
    }

    /// Keep the surface's pixel size equal to the stream's intrinsic
    /// resolution. Cameras may renegotiate mid-session, so this runs every
    /// cycle; it only touches the surface when the size actually changed.
    pub fn fit_to(&mut self, source: Resolution) {
        if !source.is_empty() && self.surface.size() != source {
            trace!(%source, "Resizing overlay surface");
            self.surface.set_size(source);
        }
    }

    /// Erase the overlay (stop, pause, teardown).
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Draw one cycle's detections.
    ///
    /// `source` is the resolution the detection coordinates are expressed
    /// in. When it is empty (stream metadata not yet known) nothing is
    /// drawn beyond the clear, since scaling would divide by zero.
    pub fn draw(&mut self, detections: &[Detection], source: Resolution) {
        self.surface.clear();
        if source.is_empty() {
            return;
        }
        let target = self.surface.size();

        // Objects first, faces on top.
        for detection in detections.iter().filter(|d| !d.is_face()) {
            self.draw_one(detection, source, target);
        }
        for detection in detections.iter().filter(|d| d.is_face()) {
            self.draw_one(detection, source, target);
        }
    }

    fn draw_one(&mut self, detection: &Detection, source: Resolution, target: Resolution) {
        let rect = detection.rect();
        if !rect.is_valid() {
            trace!(?rect, "Skipping degenerate detection box");
            return;
        }

        let (label, color) = match detection {
            Detection::Object { class, score, .. } => (object_label(class, *score), Color::MAGENTA),
            Detection::Face { .. } => ("face".to_string(), Color::RED),
        };

        let scaled = scale_rect(rect, source, target);
        self.surface.stroke_rect(scaled, color);
        self.draw_label(&label, scaled, color);
    }

    fn draw_label(&mut self, label: &str, rect: PixelRect, color: Color) {
        let width = label.chars().count() as f64 * LABEL_CHAR_WIDTH + 2.0 * LABEL_PAD;
        // Place the bar above the box, or inside its top edge when the box
        // touches the top of the surface.
        let bar_y = if rect.y >= LABEL_HEIGHT {
            rect.y - LABEL_HEIGHT
        } else {
            rect.y
        };
        let bar = PixelRect::new(rect.x, bar_y, width, LABEL_HEIGHT);
        self.surface.fill_rect(bar, color);
        self.surface
            .draw_text(label, bar.x + LABEL_PAD, bar.y + LABEL_HEIGHT - LABEL_PAD, Color::BLACK);
    }
}

/// Format an object label, e.g. `"person 92%"`.
fn object_label(class: &str, score: f32) -> String {
    format!("{} {}%", class, (score * 100.0).round() as i32)
}
