//! The backend seam under [`crate::PageCanvas`].
//!
//! A surface only knows about absolute drawing in points with the origin at
//! the top-left corner of the current page. Cursor handling, pagination and
//! unit conversion all live in the canvas.
use crate::cell::{Paint, Rect, RectStyle};
use crate::error::CanvasError;
use crate::font::FontKey;
use quire_types::Rgb;
use std::io::Write;
use std::path::Path;

/// Document properties written into the output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
}

pub trait Surface {
    /// Registers a TrueType program under `key`.
    fn register_font(&mut self, key: &FontKey, data: &[u8]) -> Result<(), CanvasError>;

    /// Whether `key` was registered through [`Surface::register_font`].
    fn has_font(&self, key: &FontKey) -> bool;

    /// Width of `text` in a registered font, in thousandths of an em.
    fn text_width(&self, key: &FontKey, text: &str) -> f64;

    /// Pixel dimensions of the image at `path`, loading it if needed.
    fn image_size(&mut self, path: &Path) -> Result<(u32, u32), CanvasError>;

    fn begin_page(&mut self, width: f64, height: f64);

    /// Draws `text` with its baseline starting at (`x`, `baseline`).
    fn text(&mut self, x: f64, baseline: f64, text: &str, font: &FontKey, size: f64, color: Rgb);

    fn line(&mut self, from: (f64, f64), to: (f64, f64), paint: Paint);

    /// A rectangle, with rounded corners when `radius > 0`.
    fn rect(&mut self, rect: Rect, radius: f64, style: RectStyle, paint: Paint);

    fn image(&mut self, path: &Path, rect: Rect) -> Result<(), CanvasError>;

    /// Serialises every page drawn so far.
    fn finish(&mut self, info: &DocumentInfo, out: &mut dyn Write) -> Result<(), CanvasError>;
}
