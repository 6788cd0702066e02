//! On-screen preview: styled runs scaled for display.

use serde::Serialize;

use super::{RenderConfig, RenderSink, walk};
use crate::styled::CharStyle;

/// A run of text as the preview pane shows it.
///
/// Family names are passed through unresolved; the display toolkit does its
/// own substitution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRun {
    pub text: String,
    pub bold: bool,
    pub font_size: u32,
    pub family: String,
}

/// Preview of a laid-out document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub runs: Vec<DisplayRun>,
    pub line_spacing: f32,
}

impl Preview {
    /// The visible text, tags removed.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreviewRenderer {
    config: RenderConfig,
}

impl PreviewRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, markup: &str) -> Preview {
        let mut sink = PreviewSink {
            scale: self.config.preview_scale,
            runs: Vec::new(),
        };
        walk(markup, &self.config.defaults(), &mut sink);
        Preview {
            runs: sink.runs,
            line_spacing: self.config.line_spacing,
        }
    }
}

struct PreviewSink {
    scale: f32,
    runs: Vec<DisplayRun>,
}

impl RenderSink for PreviewSink {
    fn run(&mut self, text: &str, style: &CharStyle) {
        let font_size = (style.size as f32 * self.scale) as u32;
        match self.runs.last_mut() {
            Some(last)
                if last.bold == style.bold
                    && last.font_size == font_size
                    && last.family == style.family =>
            {
                last.text.push_str(text);
            }
            _ => self.runs.push(DisplayRun {
                text: text.to_string(),
                bold: style.bold,
                font_size,
                family: style.family.clone(),
            }),
        }
    }
}
