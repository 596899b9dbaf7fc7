//! Page geometry configuration for a report.
use std::str::FromStr;
use thiserror::Error;

/// A configuration value the template used that has no known meaning.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        match value.as_str() {
            "p" | "portrait" => Ok(Orientation::Portrait),
            v if v.starts_with('l') => Ok(Orientation::Landscape),
            _ => Err(UnknownValue::new("orientation", s)),
        }
    }
}

/// The measurement unit every coordinate in the template is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    Point,
    #[default]
    Millimeter,
    Centimeter,
    Inch,
}

impl Unit {
    /// Number of PDF points in one unit.
    pub fn scale(self) -> f64 {
        match self {
            Unit::Point => 1.0,
            Unit::Millimeter => 72.0 / 25.4,
            Unit::Centimeter => 72.0 / 2.54,
            Unit::Inch => 72.0,
        }
    }
}

impl FromStr for Unit {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" => Ok(Unit::Point),
            "mm" => Ok(Unit::Millimeter),
            "cm" => Ok(Unit::Centimeter),
            "in" | "inch" => Ok(Unit::Inch),
            _ => Err(UnknownValue::new("unit", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFormat {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl PageFormat {
    /// Portrait dimensions in points.
    pub fn size_pt(self) -> (f64, f64) {
        match self {
            PageFormat::A3 => (841.89, 1190.55),
            PageFormat::A4 => (595.28, 841.89),
            PageFormat::A5 => (420.94, 595.28),
            PageFormat::Letter => (612.0, 792.0),
            PageFormat::Legal => (612.0, 1008.0),
            PageFormat::Tabloid => (792.0, 1224.0),
        }
    }
}

impl FromStr for PageFormat {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a3" => Ok(PageFormat::A3),
            "a4" => Ok(PageFormat::A4),
            "a5" => Ok(PageFormat::A5),
            "letter" => Ok(PageFormat::Letter),
            "legal" => Ok(PageFormat::Legal),
            "tabloid" => Ok(PageFormat::Tabloid),
            _ => Err(UnknownValue::new("page format", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const DEFAULT: f64 = 15.0;

    pub fn uniform(value: f64) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Document-level page configuration. Every field is populated once the
/// template parser has applied its defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub orientation: Orientation,
    pub unit: Unit,
    pub format: PageFormat,
    /// Overrides `format` when present, expressed in `unit`.
    pub custom_size: Option<PageSize>,
    pub margins: Margins,
}

impl Document {
    /// The page extent in document units with orientation applied.
    pub fn page_size(&self) -> PageSize {
        let (w, h) = match self.custom_size {
            Some(size) => (size.width, size.height),
            None => {
                let (w_pt, h_pt) = self.format.size_pt();
                let k = self.unit.scale();
                (w_pt / k, h_pt / k)
            }
        };
        match self.orientation {
            Orientation::Portrait => PageSize::new(w, h),
            Orientation::Landscape => PageSize::new(h, w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_a4_portrait_mm() {
        let doc = Document::default();
        assert_eq!(doc.orientation, Orientation::Portrait);
        assert_eq!(doc.unit, Unit::Millimeter);
        assert_eq!(doc.format, PageFormat::A4);
        assert_eq!(doc.margins, Margins::uniform(15.0));

        let size = doc.page_size();
        assert!((size.width - 210.0).abs() < 0.01);
        assert!((size.height - 297.0).abs() < 0.01);
    }

    #[test]
    fn landscape_swaps_extent() {
        let doc = Document {
            orientation: Orientation::Landscape,
            unit: Unit::Point,
            format: PageFormat::Letter,
            ..Document::default()
        };
        assert_eq!(doc.page_size(), PageSize::new(792.0, 612.0));
    }

    #[test]
    fn custom_size_overrides_format() {
        let doc = Document {
            custom_size: Some(PageSize::new(100.0, 50.0)),
            ..Document::default()
        };
        assert_eq!(doc.page_size(), PageSize::new(100.0, 50.0));
    }

    #[test]
    fn parses_configuration_values() {
        assert_eq!("Landscape".parse::<Orientation>(), Ok(Orientation::Landscape));
        assert_eq!("inch".parse::<Unit>(), Ok(Unit::Inch));
        assert_eq!("letter".parse::<PageFormat>(), Ok(PageFormat::Letter));
        assert!("furlong".parse::<Unit>().is_err());
    }

    #[test]
    fn any_value_starting_with_l_is_landscape() {
        for value in ["L", "land", "Lying"] {
            assert_eq!(value.parse::<Orientation>(), Ok(Orientation::Landscape));
        }
        assert_eq!("P".parse::<Orientation>(), Ok(Orientation::Portrait));
        assert!("sideways".parse::<Orientation>().is_err());
    }
}
