//! Value types describing what to draw.
use quire_types::{Align, Rgb};

/// Which sides of a cell get a border line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Border {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Border {
    pub const NONE: Border = Border { left: false, top: false, right: false, bottom: false };
    pub const ALL: Border = Border { left: true, top: true, right: true, bottom: true };

    pub fn is_all(self) -> bool {
        self == Border::ALL
    }

    pub fn is_none(self) -> bool {
        self == Border::NONE
    }

    /// The sides one line of a wrapped cell keeps: top only on the first
    /// line, bottom only on the last.
    pub(crate) fn for_line(self, first: bool, last: bool) -> Border {
        Border {
            left: self.left,
            top: self.top && first,
            right: self.right,
            bottom: self.bottom && last,
        }
    }
}

/// Where the cursor goes after a cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Advance {
    /// To the right edge of the cell, same line.
    #[default]
    Right,
    /// To the left margin of the next line.
    NextLine,
    /// Directly below the cell, keeping x.
    Below,
}

/// A rectangular text box. A width of zero extends the cell to the right margin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<'a> {
    pub width: f64,
    pub height: f64,
    pub text: &'a str,
    pub border: Border,
    pub advance: Advance,
    pub align: Align,
    pub fill: bool,
}

impl<'a> Cell<'a> {
    pub fn new(width: f64, height: f64, text: &'a str) -> Self {
        Self {
            width,
            height,
            text,
            border: Border::NONE,
            advance: Advance::Right,
            align: Align::Left,
            fill: false,
        }
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn advance(mut self, advance: Advance) -> Self {
        self.advance = advance;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }
}

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RectStyle {
    #[default]
    Stroke,
    Fill,
    FillStroke,
}

impl RectStyle {
    /// Fill, stroke, both, or stroke when neither is asked for.
    pub fn from_flags(fill: bool, stroke: bool) -> Self {
        match (fill, stroke) {
            (true, true) => RectStyle::FillStroke,
            (true, false) => RectStyle::Fill,
            _ => RectStyle::Stroke,
        }
    }

    pub fn fills(self) -> bool {
        matches!(self, RectStyle::Fill | RectStyle::FillStroke)
    }

    pub fn strokes(self) -> bool {
        matches!(self, RectStyle::Stroke | RectStyle::FillStroke)
    }
}

/// A rectangle in points, measured from the top-left corner of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Colors and stroke width in effect for a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Rgb,
    pub stroke: Rgb,
    /// In points.
    pub line_width: f64,
}
