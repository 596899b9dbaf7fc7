//! The typed object model of a quire report template.
//!
//! A [`Report`] is produced once by the template parser and is read-only
//! afterwards. Sections hold a single ordered list of [`Element`]s.

pub mod color;
pub mod document;
pub mod element;
pub mod report;
pub mod style;

pub use color::Rgb;
pub use document::{Document, Margins, Orientation, PageFormat, PageSize, Unit, UnknownValue};
pub use element::{
    Align, Column, Common, Element, ElementKind, Image, KeyValueItem, KeyValueList, Line, List,
    PageBreak, Rectangle, Table, Text,
};
pub use report::{Band, DEFAULT_BAND_HEIGHT, Metadata, Report, Section};
pub use style::{Font, Style};
