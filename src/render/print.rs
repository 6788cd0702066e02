//! Print path: positioned draw commands for the printer canvas.
//!
//! ## Vertical layout
//!
//! ```text
//! y = line_height                 first baseline
//! text line   → draw at y, y += line_height
//! blank line  → y += line_height / 2
//! ```
//!
//! `line_height` is the metric line height of the base size times the
//! configured line spacing, rounded down.

use std::collections::HashMap;

use serde::Serialize;

use super::font::{FontCatalog, FontResolver, MonospaceMetrics, TextMetrics};
use super::{RenderConfig, RenderSink, walk};
use crate::styled::CharStyle;

/// One piece of text to draw at a baseline position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawCommand {
    pub text: String,
    pub bold: bool,
    pub font_size: u32,
    /// Family after resolution against the available fonts.
    pub font_family: String,
    pub x: u32,
    /// Baseline.
    pub y: u32,
    /// Horizontal advance of `text`.
    pub width: u32,
}

/// Draw commands for a whole receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintJob {
    pub commands: Vec<DrawCommand>,
    /// Base point size the job was laid out with.
    pub font_size: u32,
    /// Final baseline position, i.e. the height the receipt needs.
    pub height: u32,
    /// True when lines were dropped because of the page height.
    pub clipped: bool,
}

#[derive(Debug, Clone)]
pub struct PrintRenderer<R = FontCatalog, M = MonospaceMetrics> {
    config: RenderConfig,
    resolver: R,
    metrics: M,
}

impl PrintRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self::with_parts(config, FontCatalog::default(), MonospaceMetrics)
    }
}

impl<R: FontResolver, M: TextMetrics> PrintRenderer<R, M> {
    pub fn with_parts(config: RenderConfig, resolver: R, metrics: M) -> Self {
        Self {
            config,
            resolver,
            metrics,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Baseline-to-baseline distance for text lines.
    pub fn line_height(&self) -> u32 {
        let base = self.metrics.line_height(self.config.font_size) as f32;
        (base * self.config.line_spacing) as u32
    }

    /// Lay out already formatted markup, one output line per `\n`.
    pub fn render(&self, markup: &str) -> PrintJob {
        let line_height = self.line_height();
        let defaults = self.config.defaults();
        let mut sink = PrintSink {
            resolver: &self.resolver,
            metrics: &self.metrics,
            resolved: HashMap::new(),
            commands: Vec::new(),
            x: 0,
            y: line_height,
        };
        let mut clipped = false;

        let mut lines: Vec<&str> = markup.split('\n').collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        for (i, &line) in lines.iter().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                sink.y = sink.y.saturating_add(line_height / 2);
                continue;
            }

            sink.x = 0;
            walk(line, &defaults, &mut sink);
            sink.y = sink.y.saturating_add(line_height);

            if let Some(page_height) = self.config.page_height {
                if sink.y > page_height {
                    clipped = i + 1 < lines.len();
                    if clipped {
                        tracing::warn!(page_height, dropped = lines.len() - i - 1, "receipt clipped");
                    }
                    break;
                }
            }
        }

        PrintJob {
            commands: sink.commands,
            font_size: self.config.font_size,
            height: sink.y,
            clipped,
        }
    }
}

struct PrintSink<'a, R, M> {
    resolver: &'a R,
    metrics: &'a M,
    resolved: HashMap<String, String>,
    commands: Vec<DrawCommand>,
    x: u32,
    y: u32,
}

impl<R: FontResolver, M: TextMetrics> RenderSink for PrintSink<'_, R, M> {
    fn run(&mut self, text: &str, style: &CharStyle) {
        let resolver = self.resolver;
        let font_family = self
            .resolved
            .entry(style.family.clone())
            .or_insert_with(|| resolver.resolve(&style.family))
            .clone();
        let width = self.metrics.advance(text, style);

        self.commands.push(DrawCommand {
            text: text.to_string(),
            bold: style.bold,
            font_size: style.size,
            font_family,
            x: self.x,
            y: self.y,
            width,
        });
        // Widths saturate for huge sizes; positions pin at the far edge.
        self.x = self.x.saturating_add(width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Resolves every family to one name.
    struct FixedResolver(&'static str);

    impl FontResolver for FixedResolver {
        fn resolve(&self, _requested: &str) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_runs_advance_horizontally() {
        let job = PrintRenderer::new(RenderConfig::default()).render("[BOLD]Hi[/BOLD] there");
        assert_eq!(job.commands.len(), 2);

        let hi = &job.commands[0];
        assert_eq!((hi.text.as_str(), hi.bold, hi.x, hi.y), ("Hi", true, 0, 14));
        // 2 chars * 12pt * 0.6
        assert_eq!(hi.width, 14);

        let there = &job.commands[1];
        assert_eq!((there.text.as_str(), there.bold, there.x), (" there", false, 14));
        assert_eq!(there.font_family, "Courier New");
    }

    #[test]
    fn test_blank_lines_advance_half() {
        let job = PrintRenderer::new(RenderConfig::default()).render("a\n\nb\n");
        let ys: Vec<u32> = job.commands.iter().map(|c| c.y).collect();
        assert_eq!(ys, vec![14, 35]);
        assert_eq!(job.height, 49);
    }

    #[test]
    fn test_line_spacing_rounds_down() {
        let renderer = PrintRenderer::new(RenderConfig {
            line_spacing: 1.5,
            ..RenderConfig::default()
        });
        assert_eq!(renderer.line_height(), 21);
    }

    #[test]
    fn test_each_line_starts_from_defaults() {
        let job = PrintRenderer::new(RenderConfig::default()).render("[SIZE=20]a\nb");
        assert_eq!(job.commands[0].font_size, 20);
        assert_eq!(job.commands[1].font_size, 12);
        assert_eq!(job.commands[1].x, 0);
    }

    #[test]
    fn test_fonts_go_through_resolver() {
        let renderer = PrintRenderer::with_parts(
            RenderConfig::default(),
            FixedResolver("Mono"),
            MonospaceMetrics,
        );
        let job = renderer.render("[FONT=Fancy]x[/FONT]y");
        assert!(job.commands.iter().all(|c| c.font_family == "Mono"));
    }

    #[test]
    fn test_base_family_applies_outside_font_tags() {
        let renderer = PrintRenderer::new(RenderConfig {
            base_family: Some("arial".into()),
            ..RenderConfig::default()
        });
        let job = renderer.render("x");
        assert_eq!(job.commands[0].font_family, "Arial");
    }

    #[test]
    fn test_huge_sizes_do_not_overflow() {
        let job = PrintRenderer::new(RenderConfig::default())
            .render("[SIZE=4000000000]ab[BOLD]cd[/BOLD][/SIZE]\nef");
        assert_eq!(job.commands.len(), 3);
        assert_eq!(job.commands[1].x, u32::MAX);
        assert_eq!(job.commands[2].x, 0);
    }

    #[test]
    fn test_page_height_clips() {
        let renderer = PrintRenderer::new(RenderConfig {
            page_height: Some(30),
            ..RenderConfig::default()
        });
        let job = renderer.render("1\n2\n3\n4");
        assert_eq!(job.commands.len(), 2);
        assert!(job.clipped);
    }

    #[test]
    fn test_last_line_fitting_exactly_is_not_clipped() {
        let renderer = PrintRenderer::new(RenderConfig {
            page_height: Some(20),
            ..RenderConfig::default()
        });
        let job = renderer.render("1\n");
        assert!(!job.clipped);
    }
}
