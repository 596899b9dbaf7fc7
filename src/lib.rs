//! quire renders declarative XML report templates, filled from JSON data, into
//! paginated PDF documents.
//!
//! ```no_run
//! use quire::Engine;
//!
//! let mut engine = Engine::builder().image_dir("assets").build();
//! engine.load_template("invoice.xml")?;
//! engine.load_data_from_file("invoice.json")?;
//! engine.generate("invoice.pdf")?;
//! # Ok::<(), quire::ReportError>(())
//! ```

pub mod engine;
pub mod error;

pub use engine::{Engine, EngineBuilder, EngineOptions};
pub use error::ReportError;

pub use quire_binding::Binder;
pub use quire_canvas::{Canvas, RecordingCanvas};
pub use quire_format::{FormatKind, format_value};
pub use quire_render::GenerationError;
pub use quire_template::TemplateError;
pub use quire_types::Report;
