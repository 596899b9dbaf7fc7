use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("Placeholder parse error in '{0}': {1}")]
    Parse(String, String),

    #[error("Unclosed placeholder in '{0}'")]
    Unclosed(String),

    #[error("Unknown helper: {0}")]
    UnknownHelper(String),

    #[error("Helper '{helper}' error: {message}")]
    Helper { helper: String, message: String },

    #[error("No value to print for '{0}'")]
    NoValue(String),

    #[error("Type error: {0}")]
    Type(String),
}
