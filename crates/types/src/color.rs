/// An explicit RGB triple. "No color" is modelled as `Option<Rgb>::None` by the
/// elements that carry a color, meaning "leave the canvas state alone".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 128, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("gray", Rgb::new(128, 128, 128)),
    ("lightgray", Rgb::new(211, 211, 211)),
    ("darkgray", Rgb::new(169, 169, 169)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("orange", Rgb::new(255, 165, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Builds a color from integer components, clamping each into `0..=255`.
    /// The second value reports whether any component had to be clamped.
    pub fn from_components(r: i64, g: i64, b: i64) -> (Self, bool) {
        let clamp = |v: i64| v.clamp(0, 255) as u8;
        let clamped = [r, g, b].iter().any(|v| !(0..=255).contains(v));
        (Self::new(clamp(r), clamp(g), clamp(b)), clamped)
    }

    /// Looks up one of the named colors understood by line elements.
    pub fn named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    /// Parse a hex color string (#RGB or #RRGGBB format)
    pub fn parse_hex(s: &str) -> Result<Rgb, String> {
        let s = s.trim();
        let Some(hex) = s.strip_prefix('#') else {
            return Err(format!("Color must start with #, got: {}", s));
        };
        if !hex.is_ascii() {
            return Err(format!("Invalid hex color: {}", s));
        }

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Rgb { r, g, b })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Rgb { r, g, b })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }

    /// Resolves a color attribute: a named color or a hex string. Anything
    /// unrecognised resolves to black.
    pub fn from_attribute(value: &str) -> Self {
        Self::named(value)
            .or_else(|| Self::parse_hex(value).ok())
            .unwrap_or(Self::BLACK)
    }

    /// Components scaled to the `0.0..=1.0` range used by PDF color operators.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}
