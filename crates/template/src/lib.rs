//! Parses XML report templates into a [`quire_types::Report`].
//!
//! Section children are decoded in the order they appear, whatever their kind.
//! Unknown elements are skipped. Unparseable values fail with the line and
//! column of the element that carried them.

pub mod error;
mod parser;
mod values;

use std::path::Path;

pub use error::{Location, TemplateError};
pub use parser::parse_report_str;
use quire_types::Report;

/// Parses a template from raw bytes, which must be UTF-8.
pub fn parse_report(bytes: &[u8]) -> Result<Report, TemplateError> {
    parse_report_str(std::str::from_utf8(bytes)?)
}

pub fn parse_report_file(path: impl AsRef<Path>) -> Result<Report, TemplateError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report(&bytes)
}
