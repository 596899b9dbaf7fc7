use quire_canvas::CanvasError;
use quire_types::ElementKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Failed to render {kind} #{index} in section '{section}': {source}")]
    Element {
        section: String,
        index: usize,
        kind: ElementKind,
        #[source]
        source: CanvasError,
    },

    #[error("Failed to render section '{section}': {source}")]
    Section {
        section: String,
        #[source]
        source: CanvasError,
    },

    #[error("PDF generation error: {0}")]
    Canvas(#[from] CanvasError),

    #[error("The document has already been finished")]
    Finished,
}
