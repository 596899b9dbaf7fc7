pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use quire::{Engine, RecordingCanvas, ReportError};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    pub fn text(&self) -> String {
        pdf_assertions::extract_text(&self.doc)
    }
}

/// An engine with `template` loaded and `data` merged.
pub fn engine_with(template: &str, data: Value) -> Result<Engine, ReportError> {
    let mut engine = Engine::new();
    engine.load_template_from_str(template)?;
    engine.load_data_from_str(&data.to_string())?;
    Ok(engine)
}

/// Generate a PDF in memory from an XML template and JSON data
pub fn generate_pdf(template: &str, data: Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let engine = engine_with(template, data)?;
    let mut bytes = Vec::new();
    engine.generate_to_writer(&mut bytes)?;
    GeneratedPdf::from_bytes(bytes)
}

/// Render onto a recording canvas and return the drawn text runs in order
pub fn recorded_texts(template: &str, data: Value) -> Result<Vec<String>, ReportError> {
    let engine = engine_with(template, data)?;
    let document = engine.report().map(|r| r.document.clone()).unwrap_or_default();
    let canvas = engine.render(RecordingCanvas::recording(&document))?;
    Ok(canvas.texts().into_iter().map(String::from).collect())
}
