use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

impl From<roxmltree::TextPos> for Location {
    fn from(pos: roxmltree::TextPos) -> Self {
        Location { line: pos.row as usize, col: pos.col as usize }
    }
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("Template is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Failed to read template file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value '{value}' for '{name}' at {location}: {message}")]
    InvalidValue {
        name: String,
        value: String,
        message: String,
        location: Location,
    },
}

impl TemplateError {
    /// Where in the template the error was found, when known.
    pub fn location(&self) -> Option<Location> {
        match self {
            TemplateError::XmlParse(e) => Some(e.pos().into()),
            TemplateError::InvalidValue { location, .. } => Some(*location),
            TemplateError::Utf8(_) | TemplateError::Io { .. } => None,
        }
    }
}
