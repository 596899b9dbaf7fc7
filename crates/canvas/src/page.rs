use crate::cell::{Advance, Border, Cell, Paint, Rect, RectStyle};
use crate::error::CanvasError;
use crate::font::{FontKey, FontSpec, StandardFont};
use crate::surface::{DocumentInfo, Surface};
use crate::wrap::wrap_lines;
use crate::{Canvas, PageDecorator};
use quire_types::{Align, Document, Margins, PageSize, Rgb};
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

/// Fraction of the font size between the vertical middle of a cell and the
/// text baseline.
const BASELINE_SHIFT: f64 = 0.3;

#[derive(Debug, Clone)]
struct GraphicsState {
    font: FontSpec,
    text_color: Rgb,
    fill_color: Rgb,
    draw_color: Rgb,
    line_width: f64,
}

#[derive(Clone, Copy)]
enum Hook {
    Header,
    Footer,
}

/// A [`Canvas`] drawing through a [`Surface`] backend.
pub struct PageCanvas<S: Surface> {
    surface: S,
    /// Points per document unit.
    k: f64,
    page_size: PageSize,
    margins: Margins,
    cell_margin: f64,
    auto_page_break: bool,
    page_break_trigger: f64,
    x: f64,
    y: f64,
    last_height: f64,
    state: GraphicsState,
    page_count: usize,
    decorator: Option<Rc<dyn PageDecorator>>,
    decorating: bool,
    info: DocumentInfo,
    error: Option<CanvasError>,
    closed: bool,
}

impl<S: Surface> PageCanvas<S> {
    /// A canvas with the page geometry of `document`. Margins start at 1cm,
    /// automatic page breaks at 2cm from the bottom.
    pub fn new(surface: S, document: &Document) -> Self {
        let k = document.unit.scale();
        let page_size = document.page_size();
        let margin = 28.35 / k;
        Self {
            surface,
            k,
            page_size,
            margins: Margins { top: margin, right: margin, bottom: 2.0 * margin, left: margin },
            cell_margin: margin / 10.0,
            auto_page_break: true,
            page_break_trigger: page_size.height - 2.0 * margin,
            x: margin,
            y: margin,
            last_height: 0.0,
            state: GraphicsState {
                font: FontSpec::default(),
                text_color: Rgb::BLACK,
                fill_color: Rgb::BLACK,
                draw_color: Rgb::BLACK,
                line_width: 0.567 / k,
            },
            page_count: 0,
            decorator: None,
            decorating: false,
            info: DocumentInfo::default(),
            error: None,
            closed: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Records the first error; later ones are dropped.
    fn fail(&mut self, error: CanvasError) {
        if self.error.is_none() {
            log::debug!("Canvas entered error state: {}", error);
            self.error = Some(error);
        }
    }

    /// Drawing is possible: no error yet, not closed, and a page exists.
    fn can_draw(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        if self.closed {
            self.fail(CanvasError::Closed);
            return false;
        }
        if self.page_count == 0 {
            self.add_page();
        }
        self.error.is_none()
    }

    fn paint(&self) -> Paint {
        Paint {
            fill: self.state.fill_color,
            stroke: self.state.draw_color,
            line_width: self.state.line_width * self.k,
        }
    }

    fn to_pt(&self, x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect { x: x * self.k, y: y * self.k, width: width * self.k, height: height * self.k }
    }

    fn run_hook(&mut self, hook: Hook) {
        let Some(decorator) = self.decorator.clone() else { return };
        self.decorating = true;
        match hook {
            Hook::Header => decorator.header(self),
            Hook::Footer => decorator.footer(self),
        }
        self.decorating = false;
    }

    fn breaks_page(&self, height: f64) -> bool {
        self.auto_page_break && !self.decorating && self.y + height > self.page_break_trigger
    }

    fn font_width(&self, font: &FontKey, text: &str) -> f64 {
        match StandardFont::resolve(font) {
            Some(standard) => standard.text_width(text),
            None => self.surface.text_width(font, text),
        }
    }

    fn draw_cell(&mut self, cell: &Cell, justify: bool) {
        let k = self.k;
        if self.breaks_page(cell.height) {
            let x = self.x;
            self.add_page();
            self.x = x;
        }
        let width = if cell.width == 0.0 {
            self.page_size.width - self.margins.right - self.x
        } else {
            cell.width
        };
        let (x, y, h) = (self.x, self.y, cell.height);

        if cell.fill || cell.border.is_all() {
            let style = match (cell.fill, cell.border.is_all()) {
                (true, true) => RectStyle::FillStroke,
                (true, false) => RectStyle::Fill,
                _ => RectStyle::Stroke,
            };
            let rect = self.to_pt(x, y, width, h);
            let paint = self.paint();
            self.surface.rect(rect, 0.0, style, paint);
        }
        if !cell.border.is_none() && !cell.border.is_all() {
            self.draw_partial_border(cell.border, x, y, width, h);
        }

        if !cell.text.is_empty() {
            let size = self.state.font.size;
            let baseline = (y + 0.5 * h) * k + BASELINE_SHIFT * size;
            if justify {
                self.draw_justified(cell.text, x, width, baseline);
            } else {
                let text_width = self.string_width(cell.text);
                let dx = match cell.align {
                    Align::Right => width - self.cell_margin - text_width,
                    Align::Center => (width - text_width) / 2.0,
                    Align::Left | Align::Justify => self.cell_margin,
                };
                self.draw_text((x + dx) * k, baseline, cell.text, text_width * k);
            }
        }

        self.last_height = h;
        match cell.advance {
            Advance::Right => self.x += width,
            Advance::NextLine => {
                self.y += h;
                self.x = self.margins.left;
            }
            Advance::Below => self.y += h,
        }
    }

    fn draw_partial_border(&mut self, border: Border, x: f64, y: f64, w: f64, h: f64) {
        let k = self.k;
        let paint = self.paint();
        let (left, top, right, bottom) = (x * k, y * k, (x + w) * k, (y + h) * k);
        if border.left {
            self.surface.line((left, top), (left, bottom), paint);
        }
        if border.top {
            self.surface.line((left, top), (right, top), paint);
        }
        if border.right {
            self.surface.line((right, top), (right, bottom), paint);
        }
        if border.bottom {
            self.surface.line((left, bottom), (right, bottom), paint);
        }
    }

    fn draw_justified(&mut self, text: &str, x: f64, width: f64, baseline: f64) {
        let words: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();
        let widths: Vec<f64> = words.iter().map(|w| self.string_width(w)).collect();
        let gaps = words.len().saturating_sub(1).max(1) as f64;
        let free = width - 2.0 * self.cell_margin - widths.iter().sum::<f64>();
        let gap = (free / gaps).max(self.string_width(" "));

        let mut cursor = x + self.cell_margin;
        for (word, w) in words.iter().zip(widths) {
            self.draw_text(cursor * self.k, baseline, word, w * self.k);
            cursor += w + gap;
        }
    }

    fn draw_text(&mut self, x: f64, baseline: f64, text: &str, width: f64) {
        let font = self.state.font.clone();
        self.surface.text(x, baseline, text, &font.key, font.size, self.state.text_color);
        if font.underline {
            let rect = Rect { x, y: baseline + 0.1 * font.size, width, height: 0.05 * font.size };
            let paint = Paint { fill: self.state.text_color, ..self.paint() };
            self.surface.rect(rect, 0.0, RectStyle::Fill, paint);
        }
    }
}

impl<S: Surface> Canvas for PageCanvas<S> {
    fn set_margins(&mut self, left: f64, top: f64, right: f64) {
        self.margins.left = left;
        self.margins.top = top;
        self.margins.right = right;
    }

    fn set_auto_page_break(&mut self, enabled: bool, margin: f64) {
        self.auto_page_break = enabled;
        self.margins.bottom = margin;
        self.page_break_trigger = self.page_size.height - margin;
    }

    fn margins(&self) -> Margins {
        self.margins
    }

    fn page_size(&self) -> PageSize {
        self.page_size
    }

    fn add_page(&mut self) {
        if self.error.is_some() {
            return;
        }
        if self.closed {
            self.fail(CanvasError::Closed);
            return;
        }
        let saved = self.state.clone();
        if self.page_count > 0 {
            self.run_hook(Hook::Footer);
        }

        self.surface.begin_page(self.page_size.width * self.k, self.page_size.height * self.k);
        self.page_count += 1;
        log::debug!("Started page {}", self.page_count);
        self.x = self.margins.left;
        self.y = self.margins.top;
        self.state = saved.clone();

        self.run_hook(Hook::Header);
        self.state = saved;
        self.x = self.margins.left;
        self.y = self.margins.top;
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn set_decorator(&mut self, decorator: Option<Rc<dyn PageDecorator>>) {
        self.decorator = decorator;
    }

    fn set_info(&mut self, info: DocumentInfo) {
        self.info = info;
    }

    fn register_font(&mut self, family: &str, style: &str, data: &[u8]) -> Result<(), CanvasError> {
        let key = FontKey::new(family, style);
        self.surface.register_font(&key, data)?;
        log::debug!("Registered font '{}' style '{}'", key.family, key.style);
        Ok(())
    }

    fn set_font(&mut self, family: &str, style: &str, size: f64) {
        let requested = FontKey::new(family, style);
        let available = |key: &FontKey| {
            StandardFont::resolve(key).is_some() || self.surface.has_font(key)
        };
        let key = if available(&requested) {
            requested
        } else if available(&requested.with_style("")) {
            log::warn!(
                "Font '{}' has no '{}' style registered, using the regular style",
                family,
                requested.style
            );
            requested.with_style("")
        } else {
            log::warn!("Font '{}' is not available, falling back to Helvetica", family);
            FontKey::new("helvetica", &requested.style)
        };

        self.state.font.key = key;
        self.state.font.underline = style.to_uppercase().contains('U');
        if size > 0.0 {
            self.state.font.size = size;
        }
    }

    fn font(&self) -> FontSpec {
        self.state.font.clone()
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.state.text_color = color;
    }

    fn text_color(&self) -> Rgb {
        self.state.text_color
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.state.fill_color = color;
    }

    fn fill_color(&self) -> Rgb {
        self.state.fill_color
    }

    fn set_draw_color(&mut self, color: Rgb) {
        self.state.draw_color = color;
    }

    fn draw_color(&self) -> Rgb {
        self.state.draw_color
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn line_width(&self) -> f64 {
        self.state.line_width
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn set_x(&mut self, x: f64) {
        self.x = if x >= 0.0 { x } else { self.page_size.width + x };
    }

    fn set_y(&mut self, y: f64) {
        self.x = self.margins.left;
        self.y = if y >= 0.0 { y } else { self.page_size.height + y };
    }

    fn ln(&mut self, height: Option<f64>) {
        self.x = self.margins.left;
        self.y += height.unwrap_or(self.last_height);
    }

    fn string_width(&self, text: &str) -> f64 {
        let font = &self.state.font;
        self.font_width(&font.key, text) * font.size / 1000.0 / self.k
    }

    fn cell(&mut self, cell: &Cell) {
        if self.can_draw() {
            self.draw_cell(cell, false);
        }
    }

    fn multi_cell(&mut self, cell: &Cell) {
        if !self.can_draw() {
            return;
        }
        let width = if cell.width == 0.0 {
            self.page_size.width - self.margins.right - self.x
        } else {
            cell.width
        };
        let max = width - 2.0 * self.cell_margin;
        let lines = wrap_lines(cell.text, max, |s| self.string_width(s));

        let start_x = self.x;
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            let justify = cell.align == Align::Justify && !line.hard_break;
            let row = Cell {
                width,
                height: cell.height,
                text: &line.text,
                border: cell.border.for_line(i == 0, i == last),
                advance: Advance::Below,
                align: cell.align,
                fill: cell.fill,
            };
            self.x = start_x;
            self.draw_cell(&row, justify);
        }
        self.x = self.margins.left;
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        if self.can_draw() {
            let k = self.k;
            let paint = self.paint();
            self.surface.line((x1 * k, y1 * k), (x2 * k, y2 * k), paint);
        }
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: RectStyle) {
        self.rounded_rect(x, y, width, height, 0.0, style);
    }

    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64, style: RectStyle) {
        if self.can_draw() {
            let rect = self.to_pt(x, y, width, height);
            let paint = self.paint();
            self.surface.rect(rect, radius.max(0.0) * self.k, style, paint);
        }
    }

    fn image(&mut self, path: &Path, x: f64, y: f64, width: f64, height: f64) -> Option<(f64, f64)> {
        let (w, h) = self.image_extent(path, width, height)?;
        let rect = self.to_pt(x, y, w, h);
        if let Err(e) = self.surface.image(path, rect) {
            self.fail(e);
            return None;
        }
        Some((w, h))
    }

    fn image_extent(&mut self, path: &Path, width: f64, height: f64) -> Option<(f64, f64)> {
        if !self.can_draw() {
            return None;
        }
        let (px_w, px_h) = match self.surface.image_size(path) {
            Ok((w, h)) if w > 0 && h > 0 => (f64::from(w), f64::from(h)),
            Ok(_) => {
                self.fail(CanvasError::Image {
                    path: path.display().to_string(),
                    message: "image has no pixels".to_string(),
                });
                return None;
            }
            Err(e) => {
                self.fail(e);
                return None;
            }
        };

        Some(match (width > 0.0, height > 0.0) {
            (true, true) => (width, height),
            (true, false) => (width, width * px_h / px_w),
            (false, true) => (height * px_w / px_h, height),
            (false, false) => {
                let w = px_w * 72.0 / 96.0 / self.k;
                (w, w * px_h / px_w)
            }
        })
    }

    fn error(&self) -> Option<&CanvasError> {
        self.error.as_ref()
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        if self.page_count == 0 {
            self.add_page();
        }
        self.run_hook(Hook::Footer);
        self.closed = true;
    }

    fn write_to(&mut self, out: &mut dyn Write) -> Result<(), CanvasError> {
        self.close();
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        self.surface.finish(&self.info, out)
    }
}
