//! Element variants that can appear inside a section, header or footer.
use crate::color::Rgb;
use std::fmt;

/// Horizontal alignment of text or images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    /// Accepts the single-letter codes (`L`, `C`, `R`, `J`) as well as the
    /// spelled-out names, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Some(Align::Left),
            "c" | "center" | "centre" => Some(Align::Center),
            "r" | "right" => Some(Align::Right),
            "j" | "justify" => Some(Align::Justify),
            _ => None,
        }
    }
}

/// Attributes shared by every element that occupies space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Common {
    /// Carried for templates that declare it; not evaluated.
    pub condition: Option<String>,
    pub spacing_after: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub common: Common,
    pub content: String,
    pub style: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: f64,
    pub align: Option<Align>,
    pub wrap: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub common: Common,
    pub path: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub align: Option<Align>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub header: String,
    pub field: String,
    pub width: f64,
    pub align: Option<Align>,
    /// Raw format name (`currency`, `percent`, anything else is plain).
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub common: Common,
    pub data_source: String,
    pub header_style: Option<String>,
    pub cell_style: Option<String>,
    pub border: bool,
    pub alternate_row_color: Option<Rgb>,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    pub common: Common,
    pub items: String,
    pub style: Option<String>,
    pub bullet: Option<String>,
    pub indent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValueItem {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValueList {
    pub common: Common,
    pub style: Option<String>,
    pub key_width: f64,
    pub value_width: f64,
    pub value_align: Option<Align>,
    pub items: Vec<KeyValueItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub common: Common,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Option<Rgb>,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rectangle {
    pub common: Common,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub fill_color: Option<Rgb>,
    pub border_color: Option<Rgb>,
    pub border_width: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBreak {
    pub condition: Option<String>,
}

/// One renderable item. Sections keep these in a single `Vec` so the declared
/// order survives across kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(Text),
    Image(Image),
    Table(Table),
    List(List),
    KeyValueList(KeyValueList),
    Line(Line),
    Rectangle(Rectangle),
    PageBreak(PageBreak),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Text,
    Image,
    Table,
    List,
    KeyValueList,
    Line,
    Rectangle,
    PageBreak,
}

impl ElementKind {
    /// The markup tag name of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Table => "table",
            ElementKind::List => "list",
            ElementKind::KeyValueList => "keyValueList",
            ElementKind::Line => "line",
            ElementKind::Rectangle => "rectangle",
            ElementKind::PageBreak => "pageBreak",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
            Element::Table(_) => ElementKind::Table,
            Element::List(_) => ElementKind::List,
            Element::KeyValueList(_) => ElementKind::KeyValueList,
            Element::Line(_) => ElementKind::Line,
            Element::Rectangle(_) => ElementKind::Rectangle,
            Element::PageBreak(_) => ElementKind::PageBreak,
        }
    }

    pub fn condition(&self) -> Option<&str> {
        let condition = match self {
            Element::Text(e) => &e.common.condition,
            Element::Image(e) => &e.common.condition,
            Element::Table(e) => &e.common.condition,
            Element::List(e) => &e.common.condition,
            Element::KeyValueList(e) => &e.common.condition,
            Element::Line(e) => &e.common.condition,
            Element::Rectangle(e) => &e.common.condition,
            Element::PageBreak(e) => &e.condition,
        };
        condition.as_deref()
    }
}
