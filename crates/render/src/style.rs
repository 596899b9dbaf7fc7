//! Named styles and how they are pushed onto a canvas.
use quire_canvas::Canvas;
use quire_types::{Align, Style};
use std::collections::HashMap;

/// Line height used when a style does not declare one.
pub const DEFAULT_LINE_HEIGHT: f64 = 6.0;

/// Style definitions indexed by name. A later definition replaces an earlier
/// one with the same name.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: HashMap<String, Style>,
}

impl StyleRegistry {
    pub fn new(styles: &[Style]) -> Self {
        let mut registry = HashMap::with_capacity(styles.len());
        for style in styles {
            if registry.insert(style.name.clone(), style.clone()).is_some() {
                log::debug!("Style '{}' is defined more than once, the last one wins", style.name);
            }
        }
        Self { styles: registry }
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Pushes the font, text color and fill color of `name` onto the canvas.
    /// Only the parts the style declares are touched; an empty or unknown
    /// name leaves the canvas as it is.
    pub fn apply(&self, name: &str, canvas: &mut dyn Canvas) {
        if name.is_empty() {
            return;
        }
        let Some(style) = self.styles.get(name) else {
            log::warn!("Style '{}' is not defined", name);
            return;
        };

        if let Some(family) = &style.font_family {
            canvas.set_font(family, &style.font_style, style.font_size);
        }
        if let Some(color) = style.text_color {
            canvas.set_text_color(color);
        }
        if let Some(color) = style.fill_color {
            canvas.set_fill_color(color);
        }
    }

    pub fn line_height(&self, name: Option<&str>) -> f64 {
        name.and_then(|n| self.styles.get(n))
            .map(|s| s.line_height)
            .filter(|h| *h > 0.0)
            .unwrap_or(DEFAULT_LINE_HEIGHT)
    }

    pub fn align(&self, name: Option<&str>) -> Option<Align> {
        name.and_then(|n| self.styles.get(n)).and_then(|s| s.align)
    }
}
