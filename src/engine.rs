//! The public entry point: load a template, merge data, write a PDF.
use crate::error::ReportError;
use quire_canvas::Canvas;
use quire_canvas_lopdf::{PdfCanvas, pdf_canvas};
use quire_render::{Pipeline, RenderContext, StyleRegistry};
use quire_template::{parse_report, parse_report_file, parse_report_str};
use quire_types::Report;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Engine-wide settings fixed at build time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOptions {
    /// Base directory for relative font file paths.
    pub font_dir: Option<PathBuf>,
    /// Base directory for relative image paths.
    pub image_dir: Option<PathBuf>,
    /// Deflate PDF streams.
    pub compression: bool,
    /// Accepted for compatibility. Templates are not validated against a schema.
    pub schema_validation: bool,
}

/// A builder for creating an [`Engine`].
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    options: EngineOptions,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.font_dir = Some(dir.into());
        self
    }

    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.image_dir = Some(dir.into());
        self
    }

    pub fn compression(mut self, enabled: bool) -> Self {
        self.options.compression = enabled;
        self
    }

    pub fn schema_validation(mut self, enabled: bool) -> Self {
        self.options.schema_validation = enabled;
        self
    }

    pub fn build(self) -> Engine {
        if self.options.schema_validation {
            log::debug!("Schema validation was requested but is not performed");
        }
        Engine { options: self.options, report: None, data: Map::new() }
    }
}

/// Holds one loaded template and the data merged so far.
///
/// An engine drives one document at a time. The merged data lives on the
/// instance; call [`Engine::reset`] between unrelated documents.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
    report: Option<Report>,
    data: Map<String, Value>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The template loaded last, if any.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn load_template(&mut self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let report = parse_report_file(path)?;
        log::info!("Loaded template '{}' ({} section(s))", path.display(), report.sections.len());
        self.report = Some(report);
        Ok(())
    }

    pub fn load_template_from_str(&mut self, xml: &str) -> Result<(), ReportError> {
        self.report = Some(parse_report_str(xml)?);
        Ok(())
    }

    pub fn load_template_from_bytes(&mut self, bytes: &[u8]) -> Result<(), ReportError> {
        self.report = Some(parse_report(bytes)?);
        Ok(())
    }

    /// Reads a JSON object from `path` and merges it into the data.
    pub fn load_data_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ReportError::Io {
            action: "read data file",
            path: path.to_path_buf(),
            source,
        })?;
        self.load_data_from_str(&json)
    }

    /// Parses a JSON object and merges it into the data. Anything other than
    /// an object at the top level is rejected.
    pub fn load_data_from_str(&mut self, json: &str) -> Result<(), ReportError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => {
                self.set_data(map);
                Ok(())
            }
            other => Err(ReportError::DataParse(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Merges `data` into the data set so far; top-level keys replace earlier ones.
    pub fn set_data(&mut self, data: Map<String, Value>) {
        log::debug!("Merging {} top-level data key(s)", data.len());
        self.data.extend(data);
    }

    /// Forgets the merged data. The template stays loaded.
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Renders the loaded template onto `canvas` and returns the closed canvas.
    pub fn render<C: Canvas>(&self, canvas: C) -> Result<C, ReportError> {
        let report = self.report.as_ref().ok_or(ReportError::NoTemplate)?;
        let ctx = RenderContext::new(StyleRegistry::new(&report.styles), Value::Object(self.data.clone()))
            .with_font_dir(self.options.font_dir.clone())
            .with_image_dir(self.options.image_dir.clone());

        let mut pipeline = Pipeline::initialize(report, ctx, canvas);
        pipeline.render_sections(&report.sections)?;
        Ok(pipeline.finish()?)
    }

    fn render_pdf(&self) -> Result<PdfCanvas, ReportError> {
        let report = self.report.as_ref().ok_or(ReportError::NoTemplate)?;
        self.render(pdf_canvas(&report.document, self.options.compression))
    }

    pub fn generate_to_writer(&self, out: &mut dyn Write) -> Result<(), ReportError> {
        let mut canvas = self.render_pdf()?;
        canvas.write_to(out)?;
        Ok(())
    }

    /// Writes the PDF to `path`. The file is only created once rendering succeeded.
    pub fn generate(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let mut canvas = self.render_pdf()?;
        let io_error = |source: std::io::Error| ReportError::Io { action: "write output file", path: path.to_path_buf(), source };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        canvas.write_to(&mut writer)?;
        writer.flush().map_err(io_error)?;
        log::info!("Generated '{}'", path.display());
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_canvas::RecordingCanvas;
    use serde_json::json;

    const TEMPLATE: &str = r#"<report version="1.0">
      <document unit="pt"/>
      <sections>
        <section name="body">
          <text>Hello {{.name}}</text>
        </section>
      </sections>
    </report>"#;

    fn render_texts(engine: &Engine) -> Vec<String> {
        let report = engine.report().unwrap();
        let canvas = engine.render(RecordingCanvas::recording(&report.document)).unwrap();
        canvas.texts().into_iter().map(String::from).collect()
    }

    #[test]
    fn data_merges_per_top_level_key() {
        let mut engine = Engine::new();
        engine.load_data_from_str(r#"{"name": "first", "keep": 1}"#).unwrap();
        engine.load_data_from_str(r#"{"name": "second"}"#).unwrap();
        assert_eq!(Value::Object(engine.data().clone()), json!({"name": "second", "keep": 1}));

        engine.reset();
        assert!(engine.data().is_empty());
    }

    #[test]
    fn non_object_data_is_rejected() {
        let mut engine = Engine::new();
        let err = engine.load_data_from_str("[1, 2]").unwrap_err();
        assert!(matches!(err, ReportError::DataParse(ref m) if m.contains("an array")));
        assert!(matches!(engine.load_data_from_str("{oops"), Err(ReportError::DataParse(_))));
    }

    #[test]
    fn missing_data_file_is_an_io_error() {
        let mut engine = Engine::new();
        let err = engine.load_data_from_file("/no/such/data.json").unwrap_err();
        assert!(matches!(err, ReportError::Io { action: "read data file", .. }));
    }

    #[test]
    fn generating_without_a_template_fails() {
        let engine = Engine::new();
        assert!(matches!(engine.generate_to_writer(&mut Vec::new()), Err(ReportError::NoTemplate)));
    }

    #[test]
    fn renders_with_merged_data() {
        let mut engine = Engine::new();
        engine.load_template_from_str(TEMPLATE).unwrap();
        engine.set_data(json!({"name": "Ada"}).as_object().unwrap().clone());
        assert_eq!(render_texts(&engine), vec!["Hello Ada"]);

        engine.reset();
        assert_eq!(render_texts(&engine), vec!["Hello {{.name}}"]);
    }

    #[test]
    fn builder_options_are_kept() {
        let engine = Engine::builder()
            .font_dir("fonts")
            .image_dir("images")
            .compression(true)
            .schema_validation(true)
            .build();
        assert_eq!(engine.options().font_dir, Some(PathBuf::from("fonts")));
        assert_eq!(engine.options().image_dir, Some(PathBuf::from("images")));
        assert!(engine.options().compression);
        assert!(engine.options().schema_validation);
    }

    #[test]
    fn invalid_template_bytes_are_a_parse_error() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.load_template_from_bytes(b"<report><sections>"),
            Err(ReportError::TemplateParse(_))
        ));
        assert!(engine.report().is_none());
    }
}
