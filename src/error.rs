// src/error.rs
use quire_canvas::CanvasError;
use quire_render::GenerationError;
use quire_template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between loading a template and writing a PDF.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to parse template: {0}")]
    TemplateParse(#[from] TemplateError),

    #[error("Failed to parse data: {0}")]
    DataParse(String),

    #[error("Failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No template loaded")]
    NoTemplate,

    #[error("Failed to generate PDF: {0}")]
    Generation(#[from] GenerationError),
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::DataParse(e.to_string())
    }
}

impl From<CanvasError> for ReportError {
    fn from(e: CanvasError) -> Self {
        ReportError::Generation(GenerationError::Canvas(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_artifact() {
        let err = ReportError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(err.to_string().starts_with("Failed to parse data:"));

        let err = ReportError::Io {
            action: "read data file",
            path: PathBuf::from("data.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Failed to read data file 'data.json': not found");

        let err = ReportError::from(CanvasError::Closed);
        assert!(matches!(err, ReportError::Generation(GenerationError::Canvas(CanvasError::Closed))));
    }
}
