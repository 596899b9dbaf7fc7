use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
    #[error("Font error: {0}")]
    Font(String),

    #[error("Image error for '{path}': {message}")]
    Image { path: String, message: String },

    #[error("Document is already closed")]
    Closed,

    #[error("Output error: {0}")]
    Output(String),
}

impl From<std::io::Error> for CanvasError {
    fn from(err: std::io::Error) -> Self {
        CanvasError::Output(err.to_string())
    }
}
