use crate::color::Rgb;
use crate::element::Align;

/// A named bundle of font, color and alignment settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub name: String,
    pub font_family: Option<String>,
    /// Style flags in the canvas convention: any combination of `B`, `I`, `U`.
    pub font_style: String,
    /// Size in points. Zero keeps whatever size the canvas currently uses.
    pub font_size: f64,
    pub text_color: Option<Rgb>,
    pub fill_color: Option<Rgb>,
    pub align: Option<Align>,
    pub line_height: f64,
}

/// A font file to register with the canvas before rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    pub name: String,
    pub family: String,
    pub style: String,
    pub file: String,
}
