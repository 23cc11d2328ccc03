//! Display surface contract.

use acam_models::{PixelRect, Resolution};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Drawing primitives of the overlay surface.
///
/// The surface's pixel size is kept equal to the stream's intrinsic
/// resolution so that coordinate scaling reduces to identity when no
/// separate display scaling applies. The renderer is the only writer.
pub trait DrawSurface: Send {
    /// Resize the surface's pixel dimensions. Implementations may clear on
    /// resize, as canvases do.
    fn set_size(&mut self, size: Resolution);

    /// Current pixel dimensions.
    fn size(&self) -> Resolution;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Draw a rectangle outline.
    fn stroke_rect(&mut self, rect: PixelRect, color: Color);

    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Draw a line of text with its baseline-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Color);
}
