//! # Pipeline
//!
//! ```text
//! StyledText ──encode──▶ markup ──layout──▶ laid-out markup ──walk──▶ Preview
//!                                                           └──walk──▶ PrintJob
//! ```
//!
//! The preview keeps overlong left-aligned lines as they are; the print path
//! clips them to the paper width (see [`LayoutConfig::for_print`]).

use crate::config::AppConfig;
use crate::error::SlipmarkError;
use crate::layout::{LayoutConfig, layout_document};
use crate::markup::strip_tags;
use crate::render::{
    FontCatalog, MonospaceMetrics, Preview, PreviewRenderer, PrintJob, PrintRenderer, RenderConfig,
};
use crate::styled::StyledText;

/// Runs markup through layout and rendering with one set of settings.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    layout: LayoutConfig,
    render: RenderConfig,
    fonts: FontCatalog,
}

impl Composer {
    pub fn new(layout: LayoutConfig, render: RenderConfig, fonts: FontCatalog) -> Self {
        Self {
            layout,
            render,
            fonts,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.layout.clone(), config.render.clone(), config.font_catalog())
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Laid-out markup as the preview shows it.
    pub fn format(&self, markup: &str) -> String {
        layout_document(markup, &self.layout)
    }

    /// Laid-out markup as it is sent to the printer.
    pub fn format_for_print(&self, markup: &str) -> Result<String, SlipmarkError> {
        ensure_content(markup)?;
        Ok(layout_document(markup, &self.layout.for_print()))
    }

    pub fn preview(&self, markup: &str) -> Preview {
        PreviewRenderer::new(self.render.clone()).render(&self.format(markup))
    }

    /// Build the draw commands for a receipt.
    ///
    /// Fails with [`SlipmarkError::EmptyContent`] when there is nothing
    /// visible to print.
    pub fn print(&self, markup: &str) -> Result<PrintJob, SlipmarkError> {
        self.print_with(markup, self.render.clone())
    }

    /// Preview of an editor document, honouring its document-wide font.
    pub fn preview_document(&self, doc: &StyledText) -> Preview {
        let render = self.render_for(doc);
        PreviewRenderer::new(render).render(&self.format(&doc.to_markup()))
    }

    /// Print an editor document, honouring its document-wide font.
    pub fn print_document(&self, doc: &StyledText) -> Result<PrintJob, SlipmarkError> {
        self.print_with(&doc.to_markup(), self.render_for(doc))
    }

    fn render_for(&self, doc: &StyledText) -> RenderConfig {
        match doc.base_family() {
            Some(family) => RenderConfig {
                base_family: Some(family.to_string()),
                ..self.render.clone()
            },
            None => self.render.clone(),
        }
    }

    fn print_with(&self, markup: &str, render: RenderConfig) -> Result<PrintJob, SlipmarkError> {
        let formatted = self.format_for_print(markup)?;
        let renderer = PrintRenderer::with_parts(render, self.fonts.clone(), MonospaceMetrics);
        let job = renderer.render(&formatted);
        tracing::info!(
            commands = job.commands.len(),
            height = job.height,
            clipped = job.clipped,
            "print job ready"
        );
        Ok(job)
    }
}

fn ensure_content(markup: &str) -> Result<(), SlipmarkError> {
    if strip_tags(markup).trim().is_empty() {
        tracing::warn!("nothing to print");
        return Err(SlipmarkError::EmptyContent);
    }
    Ok(())
}
