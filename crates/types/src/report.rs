use crate::document::Document;
use crate::element::Element;
use crate::style::{Font, Style};

/// Height applied to a header or footer block that does not declare one.
pub const DEFAULT_BAND_HEIGHT: f64 = 15.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub name: String,
    pub description: String,
    pub author: String,
    pub created: String,
    pub modified: String,
}

/// A header or footer: drawn on every page through the canvas page hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub enabled: bool,
    pub height: f64,
    /// Only text, image and line elements are accepted here.
    pub elements: Vec<Element>,
}

impl Default for Band {
    fn default() -> Self {
        Self { enabled: false, height: DEFAULT_BAND_HEIGHT, elements: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub name: String,
    pub page_break_before: bool,
    pub page_break_after: bool,
    pub condition: Option<String>,
    pub loop_source: Option<String>,
    pub loop_variable: Option<String>,
    pub elements: Vec<Element>,
}

/// The root of a parsed template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub version: String,
    pub metadata: Option<Metadata>,
    pub document: Document,
    pub fonts: Vec<Font>,
    pub styles: Vec<Style>,
    pub header: Option<Band>,
    pub footer: Option<Band>,
    pub sections: Vec<Section>,
}
