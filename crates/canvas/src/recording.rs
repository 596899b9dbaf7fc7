//! An in-memory [`Surface`] that records every primitive it is asked to draw.
//!
//! Used by the test suites of the renderer and the engine: assertions run
//! against the recorded [`DrawOp`]s instead of parsing PDF output.
use crate::cell::{Paint, Rect, RectStyle};
use crate::error::CanvasError;
use crate::font::FontKey;
use crate::page::PageCanvas;
use crate::surface::{DocumentInfo, Surface};
use quire_types::{Document, Rgb};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One recorded drawing primitive. Lengths are in points, measured from the
/// top-left corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Page { width: f64, height: f64 },
    Text { x: f64, baseline: f64, text: String, font: FontKey, size: f64, color: Rgb },
    Line { from: (f64, f64), to: (f64, f64), paint: Paint },
    Rect { rect: Rect, radius: f64, style: RectStyle, paint: Paint },
    Image { path: PathBuf, rect: Rect },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    fonts: HashSet<FontKey>,
    finished: Option<DocumentInfo>,
}

impl RecordingSurface {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// The document info passed to [`Surface::finish`], once it ran.
    pub fn finished(&self) -> Option<&DocumentInfo> {
        self.finished.as_ref()
    }
}

impl Surface for RecordingSurface {
    fn register_font(&mut self, key: &FontKey, data: &[u8]) -> Result<(), CanvasError> {
        if data.is_empty() {
            return Err(CanvasError::Font(format!("font '{}' has no data", key.family)));
        }
        self.fonts.insert(key.clone());
        Ok(())
    }

    fn has_font(&self, key: &FontKey) -> bool {
        self.fonts.contains(key)
    }

    fn text_width(&self, _key: &FontKey, text: &str) -> f64 {
        500.0 * text.chars().count() as f64
    }

    /// Every existing file reads as a 100x100 pixel image.
    fn image_size(&mut self, path: &Path) -> Result<(u32, u32), CanvasError> {
        if path.is_file() {
            Ok((100, 100))
        } else {
            Err(CanvasError::Image {
                path: path.display().to_string(),
                message: "file not found".to_string(),
            })
        }
    }

    fn begin_page(&mut self, width: f64, height: f64) {
        self.ops.push(DrawOp::Page { width, height });
    }

    fn text(&mut self, x: f64, baseline: f64, text: &str, font: &FontKey, size: f64, color: Rgb) {
        self.ops.push(DrawOp::Text {
            x,
            baseline,
            text: text.to_string(),
            font: font.clone(),
            size,
            color,
        });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), paint: Paint) {
        self.ops.push(DrawOp::Line { from, to, paint });
    }

    fn rect(&mut self, rect: Rect, radius: f64, style: RectStyle, paint: Paint) {
        self.ops.push(DrawOp::Rect { rect, radius, style, paint });
    }

    fn image(&mut self, path: &Path, rect: Rect) -> Result<(), CanvasError> {
        self.ops.push(DrawOp::Image { path: path.to_path_buf(), rect });
        Ok(())
    }

    /// Writes one line per recorded operation.
    fn finish(&mut self, info: &DocumentInfo, out: &mut dyn Write) -> Result<(), CanvasError> {
        for op in &self.ops {
            writeln!(out, "{:?}", op)?;
        }
        self.finished = Some(info.clone());
        Ok(())
    }
}

pub type RecordingCanvas = PageCanvas<RecordingSurface>;

impl PageCanvas<RecordingSurface> {
    pub fn recording(document: &Document) -> Self {
        PageCanvas::new(RecordingSurface::default(), document)
    }

    pub fn ops(&self) -> &[DrawOp] {
        self.surface().ops()
    }

    /// The text of every recorded text run, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Advance, Border, Cell};
    use crate::{Canvas, PageDecorator};
    use quire_types::{Align, Unit};
    use std::rc::Rc;

    fn points() -> Document {
        Document { unit: Unit::Point, ..Document::default() }
    }

    fn canvas() -> RecordingCanvas {
        let mut canvas = RecordingCanvas::recording(&points());
        canvas.set_margins(20.0, 30.0, 20.0);
        canvas.set_auto_page_break(true, 40.0);
        canvas
    }

    fn page_count(ops: &[DrawOp]) -> usize {
        ops.iter().filter(|op| matches!(op, DrawOp::Page { .. })).count()
    }

    #[test]
    fn first_drawing_call_adds_a_page() {
        let mut canvas = canvas();
        canvas.cell(&Cell::new(50.0, 10.0, "Hi"));
        assert_eq!(canvas.page_count(), 1);
        assert!(matches!(canvas.ops()[0], DrawOp::Page { .. }));
        assert_eq!(canvas.texts(), vec!["Hi"]);
    }

    #[test]
    fn cell_advances_cursor() {
        let mut canvas = canvas();
        canvas.add_page();
        canvas.cell(&Cell::new(50.0, 10.0, "a"));
        assert_eq!((canvas.x(), canvas.y()), (70.0, 30.0));
        canvas.cell(&Cell::new(50.0, 10.0, "b").advance(Advance::NextLine));
        assert_eq!((canvas.x(), canvas.y()), (20.0, 40.0));
        canvas.cell(&Cell::new(50.0, 12.0, "c").advance(Advance::Below));
        assert_eq!((canvas.x(), canvas.y()), (20.0, 52.0));
        canvas.ln(None);
        assert_eq!(canvas.y(), 64.0);
    }

    #[test]
    fn zero_width_cell_reaches_right_margin() {
        let mut canvas = canvas();
        canvas.add_page();
        canvas.cell(&Cell::new(0.0, 10.0, "").border(Border::ALL));
        let rect = canvas.ops().iter().find_map(|op| match op {
            DrawOp::Rect { rect, .. } => Some(*rect),
            _ => None,
        });
        let width = canvas.page_size().width - 20.0 - 20.0;
        assert_eq!(rect, Some(Rect { x: 20.0, y: 30.0, width, height: 10.0 }));
    }

    #[test]
    fn text_alignment_offsets() {
        let mut canvas = canvas();
        canvas.add_page();
        let width = canvas.string_width("ab");
        canvas.cell(&Cell::new(100.0, 10.0, "ab").align(Align::Right));
        let x = canvas.ops().iter().find_map(|op| match op {
            DrawOp::Text { x, .. } => Some(*x),
            _ => None,
        });
        let cell_margin = 28.35 / 10.0;
        let expected = 20.0 + 100.0 - cell_margin - width;
        assert!((x.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn negative_coordinates_measure_from_far_edge() {
        let mut canvas = canvas();
        canvas.add_page();
        let size = canvas.page_size();
        canvas.set_xy(-30.0, -50.0);
        assert_eq!(canvas.x(), size.width - 30.0);
        assert_eq!(canvas.y(), size.height - 50.0);
    }

    #[test]
    fn crossing_the_trigger_breaks_the_page() {
        let mut canvas = canvas();
        canvas.add_page();
        let bottom = canvas.page_size().height - 40.0;
        canvas.set_y(bottom - 5.0);
        canvas.set_x(60.0);
        canvas.cell(&Cell::new(10.0, 10.0, "x"));
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(page_count(canvas.ops()), 2);
        assert_eq!(canvas.y(), 30.0);
        assert_eq!(canvas.x(), 70.0);
    }

    #[test]
    fn multi_cell_wraps_and_returns_to_margin() {
        let mut canvas = canvas();
        canvas.add_page();
        canvas.set_font("Courier", "", 10.0);
        // 6pt per character; 60pt wide cell leaves room for 9 characters.
        canvas.multi_cell(&Cell::new(60.0, 8.0, "aaaa bbbb cccc"));
        assert_eq!(canvas.texts(), vec!["aaaa bbbb", "cccc"]);
        assert_eq!(canvas.x(), 20.0);
        assert_eq!(canvas.y(), 46.0);
    }

    #[test]
    fn partial_border_draws_lines() {
        let mut canvas = canvas();
        canvas.add_page();
        let bottom = Border { bottom: true, ..Border::NONE };
        canvas.cell(&Cell::new(30.0, 10.0, "").border(bottom));
        let lines: Vec<_> = canvas
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .collect();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn unknown_family_falls_back_to_helvetica() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut canvas = canvas();
        canvas.set_font("Comic Sans", "B", 9.0);
        let font = canvas.font();
        assert_eq!(font.key, FontKey::new("helvetica", "B"));
        assert_eq!(font.size, 9.0);
    }

    #[test]
    fn registered_family_is_selected() {
        let mut canvas = canvas();
        canvas.register_font("Inter", "", b"ttf").unwrap();
        canvas.set_font("Inter", "B", 0.0);
        assert_eq!(canvas.font().key, FontKey::new("inter", ""));
        assert_eq!(canvas.font().size, 12.0);
        assert_eq!(canvas.string_width("ab"), 12.0);
    }

    #[test]
    fn missing_image_sets_sticky_error() {
        let mut canvas = canvas();
        canvas.add_page();
        let drawn = canvas.image(Path::new("/no/such/logo.png"), 0.0, 0.0, 10.0, 0.0);
        assert!(drawn.is_none());
        assert!(matches!(canvas.error(), Some(CanvasError::Image { .. })));

        canvas.cell(&Cell::new(10.0, 10.0, "ignored"));
        assert!(canvas.texts().is_empty());
        assert!(canvas.write_to(&mut Vec::new()).is_err());
    }

    #[test]
    fn image_keeps_aspect_ratio() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut canvas = canvas();
        let drawn = canvas.image(file.path(), 10.0, 10.0, 40.0, 0.0);
        assert_eq!(drawn, Some((40.0, 40.0)));
        let natural = canvas.image(file.path(), 10.0, 10.0, 0.0, 0.0);
        assert_eq!(natural, Some((75.0, 75.0)));
        assert_eq!(canvas.image_extent(file.path(), 0.0, 30.0), Some((30.0, 30.0)));
    }

    struct Bands;

    impl PageDecorator for Bands {
        fn header(&self, canvas: &mut dyn Canvas) {
            canvas.set_font("Times", "B", 20.0);
            canvas.cell(&Cell::new(0.0, 10.0, "head"));
        }

        fn footer(&self, canvas: &mut dyn Canvas) {
            canvas.set_y(-15.0);
            canvas.cell(&Cell::new(0.0, 10.0, "foot"));
        }
    }

    #[test]
    fn decorator_runs_per_page_and_restores_state() {
        let mut canvas = canvas();
        canvas.set_decorator(Some(Rc::new(Bands)));
        canvas.add_page();
        assert_eq!(canvas.font(), crate::font::FontSpec::default());
        assert_eq!((canvas.x(), canvas.y()), (20.0, 30.0));

        canvas.add_page();
        canvas.close();
        assert_eq!(canvas.texts(), vec!["head", "foot", "head", "foot"]);
        assert!(canvas.error().is_none());
    }

    #[test]
    fn closed_canvas_rejects_new_pages() {
        let mut canvas = canvas();
        canvas.close();
        assert_eq!(canvas.page_count(), 1);
        canvas.add_page();
        assert_eq!(canvas.error(), Some(&CanvasError::Closed));
    }

    #[test]
    fn write_to_dumps_operations() {
        let mut canvas = canvas();
        canvas.set_info(DocumentInfo { title: "T".into(), ..DocumentInfo::default() });
        canvas.cell(&Cell::new(10.0, 10.0, "z"));
        let mut out = Vec::new();
        canvas.write_to(&mut out).unwrap();
        let dump = String::from_utf8(out).unwrap();
        assert!(dump.starts_with("Page"));
        assert!(dump.contains("\"z\""));
        assert_eq!(canvas.surface().finished().map(|i| i.title.as_str()), Some("T"));
    }
}
