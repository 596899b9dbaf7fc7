//! The paged drawing surface reports are rendered onto.
//!
//! [`Canvas`] is the contract the renderer talks to. [`PageCanvas`] implements
//! it once, on top of any [`Surface`] backend: it owns the cursor, margins,
//! automatic page breaks, text measurement and the header/footer hooks, so a
//! backend only has to place primitives at absolute positions.
//!
//! Drawing errors are sticky. The first failure is kept, later drawing calls
//! become no-ops, and callers check [`Canvas::error`] when convenient.

pub mod cell;
pub mod error;
pub mod font;
mod page;
pub mod recording;
pub mod surface;
mod wrap;

use std::io::Write;
use std::path::Path;
use std::rc::Rc;

pub use cell::{Advance, Border, Cell, Paint, Rect, RectStyle};
pub use error::CanvasError;
pub use font::{FontKey, FontSpec, StandardFont, to_win_ansi};
pub use page::PageCanvas;
pub use recording::{DrawOp, RecordingCanvas, RecordingSurface};
pub use surface::{DocumentInfo, Surface};

use quire_types::{Margins, PageSize, Rgb};

/// Callbacks run when a page begins and ends.
///
/// The header runs right after a page is added, the footer right before the
/// next page is added and when the document is closed. Automatic page breaks
/// are suspended while either runs, and the canvas restores its font, colors
/// and line width afterwards.
pub trait PageDecorator {
    fn header(&self, canvas: &mut dyn Canvas);
    fn footer(&self, canvas: &mut dyn Canvas);
}

/// A paged document being drawn. All lengths are in the document unit.
pub trait Canvas {
    // --- Page setup ---
    fn set_margins(&mut self, left: f64, top: f64, right: f64);
    /// Pages break automatically once a cell would cross `page height - margin`.
    fn set_auto_page_break(&mut self, enabled: bool, margin: f64);
    fn margins(&self) -> Margins;
    fn page_size(&self) -> PageSize;
    fn add_page(&mut self);
    fn page_count(&self) -> usize;
    fn set_decorator(&mut self, decorator: Option<Rc<dyn PageDecorator>>);
    fn set_info(&mut self, info: DocumentInfo);

    // --- Fonts ---
    fn register_font(&mut self, family: &str, style: &str, data: &[u8]) -> Result<(), CanvasError>;
    /// Selects a font. Style flags are any of `B`, `I`, `U`. A size of zero
    /// keeps the current size. Unknown families fall back to Helvetica.
    fn set_font(&mut self, family: &str, style: &str, size: f64);
    fn font(&self) -> FontSpec;

    // --- Graphics state ---
    fn set_text_color(&mut self, color: Rgb);
    fn text_color(&self) -> Rgb;
    fn set_fill_color(&mut self, color: Rgb);
    fn fill_color(&self) -> Rgb;
    fn set_draw_color(&mut self, color: Rgb);
    fn draw_color(&self) -> Rgb;
    fn set_line_width(&mut self, width: f64);
    fn line_width(&self) -> f64;

    // --- Cursor ---
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    /// Negative values are measured from the right edge.
    fn set_x(&mut self, x: f64);
    /// Negative values are measured from the bottom edge. Also moves x back
    /// to the left margin.
    fn set_y(&mut self, y: f64);
    fn set_xy(&mut self, x: f64, y: f64) {
        self.set_y(y);
        self.set_x(x);
    }
    /// Moves to the left margin of the next line. `None` advances by the
    /// height of the last cell.
    fn ln(&mut self, height: Option<f64>);
    fn string_width(&self, text: &str) -> f64;

    // --- Drawing ---
    fn cell(&mut self, cell: &Cell);
    /// Wraps `cell.text` into lines of `cell.height`, each as wide as the
    /// cell. Leaves the cursor at the left margin below the last line.
    fn multi_cell(&mut self, cell: &Cell);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: RectStyle);
    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64, style: RectStyle);
    /// Places an image. A zero width or height is derived from the other one
    /// (or both from the image at 96 dpi). Returns the drawn size.
    fn image(&mut self, path: &Path, x: f64, y: f64, width: f64, height: f64) -> Option<(f64, f64)>;
    /// The size [`Canvas::image`] would draw at, without drawing. A failure
    /// to load the image is recorded as the canvas error.
    fn image_extent(&mut self, path: &Path, width: f64, height: f64) -> Option<(f64, f64)>;

    // --- Lifecycle ---
    fn error(&self) -> Option<&CanvasError>;
    /// Finishes the last page (running its footer). Later drawing fails.
    fn close(&mut self);
    /// Closes the document if needed and serialises it.
    fn write_to(&mut self, out: &mut dyn Write) -> Result<(), CanvasError>;
}
