//! Header and footer bands, drawn through the canvas page hooks.
use crate::context::RenderContext;
use crate::elements::render_element;
use quire_canvas::{Canvas, PageDecorator};
use quire_types::Band;

/// Renders the enabled header and footer of a report on every page.
pub struct BandDecorator {
    ctx: RenderContext,
    header: Option<Band>,
    footer: Option<Band>,
}

impl BandDecorator {
    /// Disabled bands are dropped. Returns `None` when nothing is left to draw.
    pub fn new(ctx: RenderContext, header: Option<&Band>, footer: Option<&Band>) -> Option<Self> {
        let header = header.filter(|b| b.enabled).cloned();
        let footer = footer.filter(|b| b.enabled).cloned();
        if header.is_none() && footer.is_none() {
            return None;
        }
        Some(Self { ctx, header, footer })
    }

    fn render(&self, band: &Band, canvas: &mut dyn Canvas) {
        for element in &band.elements {
            render_element(element, &self.ctx, canvas);
        }
    }
}

impl PageDecorator for BandDecorator {
    fn header(&self, canvas: &mut dyn Canvas) {
        if let Some(band) = &self.header {
            self.render(band, canvas);
        }
    }

    /// The footer band starts `height` above the bottom edge of the page.
    fn footer(&self, canvas: &mut dyn Canvas) {
        if let Some(band) = &self.footer {
            canvas.set_y(-band.height);
            self.render(band, canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleRegistry;
    use quire_canvas::{DrawOp, RecordingCanvas};
    use quire_types::{Document, Element, Text, Unit};
    use serde_json::json;
    use std::rc::Rc;

    fn band(content: &str, height: f64) -> Band {
        Band {
            enabled: true,
            height,
            elements: vec![Element::Text(Text { content: content.into(), ..Text::default() })],
        }
    }

    fn ctx() -> RenderContext {
        RenderContext::new(StyleRegistry::default(), json!({"company": "Acme"}))
    }

    #[test]
    fn disabled_bands_are_dropped() {
        let disabled = Band { enabled: false, ..band("x", 10.0) };
        assert!(BandDecorator::new(ctx(), Some(&disabled), None).is_none());
        assert!(BandDecorator::new(ctx(), None, None).is_none());
        assert!(BandDecorator::new(ctx(), None, Some(&band("x", 10.0))).is_some());
    }

    #[test]
    fn header_and_footer_on_every_page() {
        let header = band("{{.company}} report", 15.0);
        let footer = band("footer", 20.0);
        let decorator = BandDecorator::new(ctx(), Some(&header), Some(&footer)).unwrap();

        let mut canvas = RecordingCanvas::recording(&Document { unit: Unit::Point, ..Document::default() });
        canvas.set_decorator(Some(Rc::new(decorator)));
        canvas.add_page();
        canvas.add_page();
        canvas.close();

        assert_eq!(canvas.texts(), vec!["Acme report", "footer", "Acme report", "footer"]);

        let height = canvas.page_size().height;
        let footer_baselines: Vec<f64> = canvas
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, baseline, .. } if text == "footer" => Some(*baseline),
                _ => None,
            })
            .collect();
        assert_eq!(footer_baselines.len(), 2);
        assert!(footer_baselines.iter().all(|b| *b > height - 20.0 && *b < height));
    }
}
