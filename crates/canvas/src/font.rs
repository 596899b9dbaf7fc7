//! Font identities and metrics for the standard PDF fonts.

/// A font family plus style, normalised so lookups are stable:
/// the family is lower-case (`arial` is an alias of `helvetica`) and the
/// style is one of `""`, `"B"`, `"I"` or `"BI"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FontKey {
    pub family: String,
    pub style: String,
}

impl FontKey {
    pub fn new(family: &str, style: &str) -> Self {
        let family = family.trim().to_lowercase();
        let family = if family == "arial" { "helvetica".to_string() } else { family };
        let style = style.to_uppercase();
        let style = match (style.contains('B'), style.contains('I')) {
            (true, true) => "BI",
            (true, false) => "B",
            (false, true) => "I",
            (false, false) => "",
        };
        Self { family, style: style.to_string() }
    }

    pub fn with_style(&self, style: &str) -> Self {
        Self::new(&self.family, style)
    }
}

/// The font in effect on a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub key: FontKey,
    /// Size in points.
    pub size: f64,
    pub underline: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { key: FontKey::new("helvetica", ""), size: 12.0, underline: false }
    }
}

/// The built-in fonts every PDF viewer provides. They use WinAnsi encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    pub fn resolve(key: &FontKey) -> Option<Self> {
        use StandardFont::*;
        let font = match (key.family.as_str(), key.style.as_str()) {
            ("helvetica", "") => Helvetica,
            ("helvetica", "B") => HelveticaBold,
            ("helvetica", "I") => HelveticaOblique,
            ("helvetica", "BI") => HelveticaBoldOblique,
            ("times", "") => TimesRoman,
            ("times", "B") => TimesBold,
            ("times", "I") => TimesItalic,
            ("times", "BI") => TimesBoldItalic,
            ("courier", "") => Courier,
            ("courier", "B") => CourierBold,
            ("courier", "I") => CourierOblique,
            ("courier", "BI") => CourierBoldOblique,
            _ => return None,
        };
        Some(font)
    }

    /// The `/BaseFont` name.
    pub fn base_font(self) -> &'static str {
        use StandardFont::*;
        match self {
            Helvetica => "Helvetica",
            HelveticaBold => "Helvetica-Bold",
            HelveticaOblique => "Helvetica-Oblique",
            HelveticaBoldOblique => "Helvetica-BoldOblique",
            TimesRoman => "Times-Roman",
            TimesBold => "Times-Bold",
            TimesItalic => "Times-Italic",
            TimesBoldItalic => "Times-BoldItalic",
            Courier => "Courier",
            CourierBold => "Courier-Bold",
            CourierOblique => "Courier-Oblique",
            CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Advance width of `c` in thousandths of an em. Italic faces share the
    /// widths of their upright counterparts.
    pub fn char_width(self, c: char) -> u16 {
        use StandardFont::*;
        let (table, fallback) = match self {
            Courier | CourierBold | CourierOblique | CourierBoldOblique => return 600,
            Helvetica | HelveticaOblique => (&HELVETICA, 556),
            HelveticaBold | HelveticaBoldOblique => (&HELVETICA_BOLD, 556),
            TimesRoman | TimesItalic => (&TIMES_ROMAN, 500),
            TimesBold | TimesBoldItalic => (&TIMES_BOLD, 500),
        };
        match c {
            ' '..='~' => table[(c as usize) - 32],
            '\u{2022}' => 350,
            _ => fallback,
        }
    }

    /// Width of `text` in thousandths of an em.
    pub fn text_width(self, text: &str) -> f64 {
        text.chars().map(|c| f64::from(self.char_width(c))).sum()
    }
}

// Widths for the printable ASCII range 32..=126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

/// Encodes text for a standard font. Characters outside Windows-1252 become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c as u32 {
        0x00..=0x7F | 0xA0..=0xFF => c as u8,
        _ => match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_normalised() {
        assert_eq!(FontKey::new(" Arial ", "bi"), FontKey::new("helvetica", "BI"));
        assert_eq!(FontKey::new("Times", "IB").style, "BI");
        assert_eq!(FontKey::new("Courier", "U").style, "");
    }

    #[test]
    fn resolves_standard_fonts() {
        let bold = StandardFont::resolve(&FontKey::new("Helvetica", "B")).unwrap();
        assert_eq!(bold.base_font(), "Helvetica-Bold");
        assert!(StandardFont::resolve(&FontKey::new("Comic Sans", "")).is_none());
    }

    #[test]
    fn measures_text() {
        let helv = StandardFont::Helvetica;
        assert_eq!(helv.char_width('A'), 667);
        assert_eq!(helv.char_width('i'), 222);
        assert_eq!(helv.char_width('~'), 584);
        assert_eq!(helv.text_width("Hi"), 722.0 + 222.0);
        assert_eq!(StandardFont::CourierBold.text_width("abc"), 1800.0);
        assert_eq!(StandardFont::TimesRoman.char_width(' '), 250);
    }

    #[test]
    fn encodes_win_ansi() {
        assert_eq!(to_win_ansi("a•é€"), vec![b'a', 0x95, 0xE9, 0x80]);
        assert_eq!(to_win_ansi("漢"), vec![b'?']);
    }
}
