//! Drives one report through a canvas, section by section.
use crate::bands::BandDecorator;
use crate::context::RenderContext;
use crate::elements::render_element;
use crate::error::GenerationError;
use quire_canvas::{Canvas, DocumentInfo};
use quire_types::{Font, Report, Section};
use std::fs;
use std::rc::Rc;

/// Value written as the document's creator.
pub const CREATOR: &str = "quire";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Canvas configured, no page yet.
    Initialized,
    /// At least one section has started a page.
    PageActive,
    /// Canvas closed; no more sections are accepted.
    Finalized,
}

pub struct Pipeline<C: Canvas> {
    canvas: C,
    ctx: RenderContext,
    state: PipelineState,
}

impl<C: Canvas> Pipeline<C> {
    /// Configures `canvas` for `report`: margins, automatic page breaks,
    /// registered fonts, header/footer bands and document properties.
    pub fn initialize(report: &Report, ctx: RenderContext, mut canvas: C) -> Self {
        let margins = report.document.margins;
        canvas.set_margins(margins.left, margins.top, margins.right);
        canvas.set_auto_page_break(true, margins.bottom);

        for font in &report.fonts {
            register_font(&mut canvas, &ctx, font);
        }

        if let Some(decorator) = BandDecorator::new(ctx.clone(), report.header.as_ref(), report.footer.as_ref()) {
            canvas.set_decorator(Some(Rc::new(decorator)));
        }

        let mut info = DocumentInfo { creator: CREATOR.to_string(), ..DocumentInfo::default() };
        if let Some(metadata) = &report.metadata {
            info.title = metadata.name.clone();
            info.author = metadata.author.clone();
            info.subject = metadata.description.clone();
        }
        canvas.set_info(info);

        log::debug!(
            "Pipeline initialized: {} section(s), {} font(s), {} style(s)",
            report.sections.len(),
            report.fonts.len(),
            ctx.styles.len()
        );
        Self { canvas, ctx, state: PipelineState::Initialized }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn render_section(&mut self, section: &Section) -> Result<(), GenerationError> {
        match self.state {
            PipelineState::Finalized => return Err(GenerationError::Finished),
            PipelineState::Initialized => {
                self.canvas.add_page();
                self.state = PipelineState::PageActive;
            }
            PipelineState::PageActive => {
                if section.page_break_before {
                    self.canvas.add_page();
                }
            }
        }
        self.check_section(section)?;

        if let Some(condition) = &section.condition {
            log::debug!("Section '{}' has condition '{}', rendering unconditionally", section.name, condition);
        }
        if let Some(source) = &section.loop_source {
            log::debug!("Section '{}' loops over '{}', rendering once", section.name, source);
        }

        log::debug!("Rendering section '{}' ({} element(s))", section.name, section.elements.len());
        for (index, element) in section.elements.iter().enumerate() {
            log::debug!("Rendering {} #{} in section '{}'", element.kind(), index, section.name);
            render_element(element, &self.ctx, &mut self.canvas);
            if let Some(source) = self.canvas.error() {
                return Err(GenerationError::Element {
                    section: section.name.clone(),
                    index,
                    kind: element.kind(),
                    source: source.clone(),
                });
            }
        }

        if section.page_break_after {
            self.canvas.add_page();
            self.check_section(section)?;
        }
        Ok(())
    }

    pub fn render_sections(&mut self, sections: &[Section]) -> Result<(), GenerationError> {
        sections.iter().try_for_each(|section| self.render_section(section))
    }

    /// Closes the canvas, drawing the footer of the last page, and hands it back.
    pub fn finish(mut self) -> Result<C, GenerationError> {
        if self.state == PipelineState::Finalized {
            return Err(GenerationError::Finished);
        }
        self.canvas.close();
        self.state = PipelineState::Finalized;
        if let Some(err) = self.canvas.error() {
            return Err(GenerationError::Canvas(err.clone()));
        }
        log::debug!("Pipeline finished with {} page(s)", self.canvas.page_count());
        Ok(self.canvas)
    }

    fn check_section(&self, section: &Section) -> Result<(), GenerationError> {
        match self.canvas.error() {
            Some(source) => Err(GenerationError::Section { section: section.name.clone(), source: source.clone() }),
            None => Ok(()),
        }
    }
}

fn register_font(canvas: &mut dyn Canvas, ctx: &RenderContext, font: &Font) {
    let path = ctx.font_path(&font.file);
    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Could not read font '{}' from '{}': {}", font.name, path.display(), e);
            return;
        }
    };
    match canvas.register_font(&font.family, &font.style, &data) {
        Ok(()) => log::debug!("Registered font '{}' as {} {:?}", font.name, font.family, font.style),
        Err(e) => log::warn!("Could not register font '{}': {}", font.name, e),
    }
}
