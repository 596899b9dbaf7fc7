use crate::style::StyleRegistry;
use quire_binding::{Binder, resolve_data_source};
use serde_json::Value;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Shared, read-only inputs of one generation run.
///
/// Cloning is cheap; the page decorator keeps its own clone so headers and
/// footers resolve against the same data as the body.
#[derive(Clone)]
pub struct RenderContext {
    pub styles: Rc<StyleRegistry>,
    pub data: Rc<Value>,
    pub binder: Rc<Binder>,
    /// Base directory for relative font file paths.
    pub font_dir: Option<PathBuf>,
    /// Base directory for relative image paths.
    pub image_dir: Option<PathBuf>,
}

impl RenderContext {
    pub fn new(styles: StyleRegistry, data: Value) -> Self {
        Self {
            styles: Rc::new(styles),
            data: Rc::new(data),
            binder: Rc::new(Binder::new()),
            font_dir: None,
            image_dir: None,
        }
    }

    pub fn with_binder(mut self, binder: Binder) -> Self {
        self.binder = Rc::new(binder);
        self
    }

    pub fn with_font_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.font_dir = dir;
        self
    }

    pub fn with_image_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.image_dir = dir;
        self
    }

    /// Substitutes placeholders in `fragment`, leaving it as written when it
    /// cannot be bound.
    pub fn resolve<'a>(&self, fragment: &'a str) -> Cow<'a, str> {
        self.binder.resolve(fragment, &self.data)
    }

    /// The raw data value a `dataSource`/`items` reference points at.
    pub fn data_source(&self, reference: &str) -> Option<&Value> {
        resolve_data_source(&self.data, reference)
    }

    pub fn font_path(&self, file: &str) -> PathBuf {
        join_relative(self.font_dir.as_deref(), file)
    }

    pub fn image_path(&self, file: &str) -> PathBuf {
        join_relative(self.image_dir.as_deref(), file)
    }
}

fn join_relative(base: Option<&Path>, file: &str) -> PathBuf {
    let path = Path::new(file);
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}
