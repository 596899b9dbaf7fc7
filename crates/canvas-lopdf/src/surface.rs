use crate::font::TrueTypeFont;
use crate::xobject::ImageXObject;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, StringFormat, dictionary};
use quire_canvas::{
    CanvasError, DocumentInfo, FontKey, Paint, Rect, RectStyle, StandardFont, Surface, to_win_ansi,
};
use quire_types::Rgb;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Control point distance for quarter circles drawn as cubic curves.
const KAPPA: f64 = 0.552_284_8;

#[derive(Debug)]
enum FontProgram {
    Standard(StandardFont),
    TrueType(TrueTypeFont),
}

#[derive(Debug)]
struct FontSlot {
    resource: String,
    program: FontProgram,
}

#[derive(Debug)]
struct ImageSlot {
    resource: String,
    xobject: ImageXObject,
}

#[derive(Debug)]
struct Page {
    width: f64,
    height: f64,
    operations: Vec<Operation>,
}

/// A [`Surface`] that builds a PDF document with lopdf.
///
/// Pages are kept as operation lists until [`Surface::finish`], which writes
/// one shared resource dictionary for every font and image used.
#[derive(Debug, Default)]
pub struct PdfSurface {
    compress: bool,
    pages: Vec<Page>,
    fonts: Vec<FontSlot>,
    font_index: HashMap<FontKey, usize>,
    images: Vec<ImageSlot>,
    image_index: HashMap<PathBuf, usize>,
}

fn real(value: f64) -> Object {
    Object::from(value as f32)
}

fn color_operands(color: Rgb) -> Vec<Object> {
    color.to_unit().iter().map(|c| Object::from(*c)).collect()
}

impl PdfSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deflate every stream when the document is written.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn push(&mut self, operations: impl IntoIterator<Item = Operation>) {
        if let Some(page) = self.pages.last_mut() {
            page.operations.extend(operations);
        }
    }

    fn page_height(&self) -> f64 {
        self.pages.last().map(|p| p.height).unwrap_or(0.0)
    }

    /// The slot for `key`, creating a standard font slot on first use.
    /// Keys that are neither registered nor standard map to Helvetica.
    fn font_slot(&mut self, key: &FontKey) -> usize {
        if let Some(index) = self.font_index.get(key) {
            return *index;
        }
        let standard = StandardFont::resolve(key).unwrap_or(StandardFont::Helvetica);
        let index = self.fonts.len();
        self.fonts.push(FontSlot {
            resource: format!("F{}", index + 1),
            program: FontProgram::Standard(standard),
        });
        self.font_index.insert(key.clone(), index);
        index
    }

    fn image_slot(&mut self, path: &Path) -> Result<usize, CanvasError> {
        if let Some(index) = self.image_index.get(path) {
            return Ok(*index);
        }
        let xobject = ImageXObject::load(path)?;
        log::debug!("Loaded image '{}' ({}x{})", path.display(), xobject.width, xobject.height);
        let index = self.images.len();
        self.images.push(ImageSlot { resource: format!("Im{}", index + 1), xobject });
        self.image_index.insert(path.to_path_buf(), index);
        Ok(index)
    }

    fn stroke_setup(paint: Paint) -> [Operation; 2] {
        [
            Operation::new("w", vec![real(paint.line_width)]),
            Operation::new("RG", color_operands(paint.stroke)),
        ]
    }

    fn rounded_path(x0: f64, y0: f64, x1: f64, y1: f64, r: f64) -> Vec<Operation> {
        let kr = r * KAPPA;
        let point = |op: &str, coords: &[f64]| {
            Operation::new(op, coords.iter().map(|v| real(*v)).collect())
        };
        vec![
            point("m", &[x0 + r, y0]),
            point("l", &[x1 - r, y0]),
            point("c", &[x1 - r + kr, y0, x1, y0 + r - kr, x1, y0 + r]),
            point("l", &[x1, y1 - r]),
            point("c", &[x1, y1 - r + kr, x1 - r + kr, y1, x1 - r, y1]),
            point("l", &[x0 + r, y1]),
            point("c", &[x0 + r - kr, y1, x0, y1 - r + kr, x0, y1 - r]),
            point("l", &[x0, y0 + r]),
            point("c", &[x0, y0 + r - kr, x0 + r - kr, y0, x0 + r, y0]),
            Operation::new("h", vec![]),
        ]
    }

    fn build(&self, info: &DocumentInfo) -> Result<Document, CanvasError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for slot in &self.fonts {
            let id = match &slot.program {
                FontProgram::Standard(font) => doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                }),
                FontProgram::TrueType(font) => font.write(&mut doc),
            };
            font_dict.set(slot.resource.as_bytes(), Object::Reference(id));
        }
        let mut xobject_dict = Dictionary::new();
        for slot in &self.images {
            let id = slot.xobject.write(&mut doc);
            xobject_dict.set(slot.resource.as_bytes(), Object::Reference(id));
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => font_dict,
            "XObject" => xobject_dict,
        });

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content = Content { operations: page.operations.clone() };
            let bytes = content.encode().map_err(|e| CanvasError::Output(e.to_string()))?;
            let content_id = doc.add_object(lopdf::Stream::new(Dictionary::new(), bytes));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), real(page.width), real(page.height)],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.pages.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info_dict = dictionary! {
            "Producer" => Object::String(b"quire".to_vec(), StringFormat::Literal),
        };
        for (key, value) in [
            ("Title", &info.title),
            ("Author", &info.author),
            ("Subject", &info.subject),
            ("Creator", &info.creator),
        ] {
            if !value.is_empty() {
                info_dict.set(key, Object::String(to_win_ansi(value), StringFormat::Literal));
            }
        }
        let info_id = doc.add_object(info_dict);
        doc.trailer.set("Info", info_id);

        if self.compress {
            doc.compress();
        }
        Ok(doc)
    }
}

impl Surface for PdfSurface {
    fn register_font(&mut self, key: &FontKey, data: &[u8]) -> Result<(), CanvasError> {
        let font = TrueTypeFont::parse(key, data)?;
        let program = FontProgram::TrueType(font);
        match self.font_index.get(key) {
            Some(index) => self.fonts[*index].program = program,
            None => {
                let index = self.fonts.len();
                self.fonts.push(FontSlot { resource: format!("F{}", index + 1), program });
                self.font_index.insert(key.clone(), index);
            }
        }
        Ok(())
    }

    fn has_font(&self, key: &FontKey) -> bool {
        self.font_index
            .get(key)
            .is_some_and(|i| matches!(self.fonts[*i].program, FontProgram::TrueType(_)))
    }

    fn text_width(&self, key: &FontKey, text: &str) -> f64 {
        match self.font_index.get(key).map(|i| &self.fonts[*i].program) {
            Some(FontProgram::TrueType(font)) => font.text_width(text),
            Some(FontProgram::Standard(font)) => font.text_width(text),
            None => StandardFont::Helvetica.text_width(text),
        }
    }

    fn image_size(&mut self, path: &Path) -> Result<(u32, u32), CanvasError> {
        let index = self.image_slot(path)?;
        let xobject = &self.images[index].xobject;
        Ok((xobject.width, xobject.height))
    }

    fn begin_page(&mut self, width: f64, height: f64) {
        self.pages.push(Page { width, height, operations: Vec::new() });
    }

    fn text(&mut self, x: f64, baseline: f64, text: &str, font: &FontKey, size: f64, color: Rgb) {
        let index = self.font_slot(font);
        let slot = &mut self.fonts[index];
        let encoded = match &mut slot.program {
            FontProgram::Standard(_) => Object::String(to_win_ansi(text), StringFormat::Literal),
            FontProgram::TrueType(font) => {
                Object::String(font.encode(text), StringFormat::Hexadecimal)
            }
        };
        let resource = Object::Name(slot.resource.clone().into_bytes());
        let y = self.page_height() - baseline;
        self.push([
            Operation::new("BT", vec![]),
            Operation::new("rg", color_operands(color)),
            Operation::new("Tf", vec![resource, real(size)]),
            Operation::new("Td", vec![real(x), real(y)]),
            Operation::new("Tj", vec![encoded]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), paint: Paint) {
        let h = self.page_height();
        let mut ops = Vec::from(Self::stroke_setup(paint));
        ops.push(Operation::new("m", vec![real(from.0), real(h - from.1)]));
        ops.push(Operation::new("l", vec![real(to.0), real(h - to.1)]));
        ops.push(Operation::new("S", vec![]));
        self.push(ops);
    }

    fn rect(&mut self, rect: Rect, radius: f64, style: RectStyle, paint: Paint) {
        let h = self.page_height();
        let mut ops = Vec::new();
        if style.fills() {
            ops.push(Operation::new("rg", color_operands(paint.fill)));
        }
        if style.strokes() {
            ops.extend(Self::stroke_setup(paint));
        }

        let bottom = h - rect.y - rect.height;
        let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
        if r > 0.0 {
            ops.extend(Self::rounded_path(rect.x, bottom, rect.x + rect.width, h - rect.y, r));
        } else {
            ops.push(Operation::new(
                "re",
                vec![real(rect.x), real(bottom), real(rect.width), real(rect.height)],
            ));
        }
        let paint_op = match style {
            RectStyle::Fill => "f",
            RectStyle::Stroke => "S",
            RectStyle::FillStroke => "B",
        };
        ops.push(Operation::new(paint_op, vec![]));
        self.push(ops);
    }

    fn image(&mut self, path: &Path, rect: Rect) -> Result<(), CanvasError> {
        let index = self.image_slot(path)?;
        let resource = Object::Name(self.images[index].resource.clone().into_bytes());
        let bottom = self.page_height() - rect.y - rect.height;
        self.push([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![real(rect.width), 0.into(), 0.into(), real(rect.height), real(rect.x), real(bottom)],
            ),
            Operation::new("Do", vec![resource]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    fn finish(&mut self, info: &DocumentInfo, out: &mut dyn Write) -> Result<(), CanvasError> {
        let mut doc = self.build(info)?;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).map_err(|e| CanvasError::Output(e.to_string()))?;
        out.write_all(&buffer)?;
        log::info!("Wrote PDF with {} page(s), {} bytes", self.pages.len(), buffer.len());
        Ok(())
    }
}
