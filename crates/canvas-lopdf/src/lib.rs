//! PDF output for the quire canvas.
//!
//! [`PdfSurface`] turns the primitives produced by
//! [`quire_canvas::PageCanvas`] into lopdf content streams. Standard fonts are
//! referenced as Type1 with WinAnsi encoding; registered TrueType programs are
//! embedded whole.

mod font;
mod surface;
mod xobject;

pub use surface::PdfSurface;

use quire_canvas::PageCanvas;
use quire_types::Document;

/// A canvas that writes PDF.
pub type PdfCanvas = PageCanvas<PdfSurface>;

/// A PDF canvas laid out for `document`, optionally deflating its streams.
pub fn pdf_canvas(document: &Document, compress: bool) -> PdfCanvas {
    PageCanvas::new(PdfSurface::new().with_compression(compress), document)
}
