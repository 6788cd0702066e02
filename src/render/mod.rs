//! # Render Walker
//!
//! Replays laid-out markup as a stream of styled text runs. The same walk
//! drives the on-screen preview ([`PreviewRenderer`]) and the print canvas
//! ([`PrintRenderer`]).
//!
//! ```text
//! "[BOLD]Hi[/BOLD] there"
//!        │
//!        ▼
//!  ("Hi",    bold)     ── flushed when [/BOLD] is seen
//!  (" there", plain)   ── flushed at end of input
//! ```
//!
//! Text between tags is flushed under the state that was in effect *before*
//! the tag, then the tag is applied. A closed channel falls back to the
//! walk's defaults, which need not be the markup defaults: the print path
//! uses its own base size and the document's base family.
//!
//! ## Example
//!
//! ```
//! use slipmark::render::styled_runs;
//! use slipmark::styled::CharStyle;
//!
//! let runs = styled_runs("[BOLD]Hi[/BOLD] there", &CharStyle::default());
//! assert_eq!(runs.len(), 2);
//! assert!(runs[0].style.bold);
//! ```

pub mod font;
mod preview;
mod print;

pub use font::{FontCatalog, FontResolver, MonospaceMetrics, TextMetrics, resolve_family};
pub use preview::{DisplayRun, Preview, PreviewRenderer};
pub use print::{DrawCommand, PrintJob, PrintRenderer};

use serde::{Deserialize, Serialize};

use crate::markup::{Tag, Token, tokenize};
use crate::styled::{CharStyle, Run};

/// Receives the styled text of a walk.
pub trait RenderSink {
    fn run(&mut self, text: &str, style: &CharStyle);
}

impl RenderSink for Vec<Run> {
    fn run(&mut self, text: &str, style: &CharStyle) {
        match self.last_mut() {
            Some(last) if &last.style == style => last.text.push_str(text),
            _ => self.push(Run::new(text, style.clone())),
        }
    }
}

/// Rendering parameters shared by the preview and print paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Point size of text outside any `[SIZE=n]`.
    pub font_size: u32,
    /// Multiplier applied to the base line height.
    pub line_spacing: f32,
    /// Scale applied to sizes in the on-screen preview.
    pub preview_scale: f32,
    /// Family of text outside any `[FONT=name]`; the markup default when unset.
    pub base_family: Option<String>,
    /// Stop laying out lines past this height.
    pub page_height: Option<u32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 12,
            line_spacing: 1.0,
            preview_scale: 1.25,
            base_family: None,
            page_height: None,
        }
    }
}

impl RenderConfig {
    /// The style a walk starts from.
    pub fn defaults(&self) -> CharStyle {
        match &self.base_family {
            Some(family) if !family.trim().is_empty() => CharStyle {
                size: self.font_size,
                ..CharStyle::with_family(family.as_str())
            },
            _ => CharStyle {
                size: self.font_size,
                ..CharStyle::default()
            },
        }
    }
}

/// Walk `markup`, handing each stretch of text and its style to `sink`.
///
/// `[SIZE=n]` values too large to read, and closed channels, take their
/// value from `defaults`. A `[FONT=...]` whose name is only whitespace is
/// ignored.
pub fn walk<S: RenderSink + ?Sized>(markup: &str, defaults: &CharStyle, sink: &mut S) {
    let mut style = defaults.clone();
    let mut pending: Option<&str> = None;

    for token in tokenize(markup) {
        match token {
            Token::Text(text) => pending = Some(text),
            Token::Tag { tag, .. } => {
                if let Some(text) = pending.take() {
                    sink.run(text, &style);
                }
                match tag {
                    Tag::BoldOpen => style.bold = true,
                    Tag::BoldClose => style.bold = false,
                    Tag::SizeOpen(value) => style.size = value.unwrap_or(defaults.size),
                    Tag::SizeClose => style.size = defaults.size,
                    Tag::FontOpen(name) if !name.trim().is_empty() => {
                        style.family = name.trim().to_string();
                    }
                    Tag::FontOpen(_) => {}
                    Tag::FontClose => style.family = defaults.family.clone(),
                }
            }
        }
    }

    if let Some(text) = pending {
        sink.run(text, &style);
    }
}

/// Collect a walk into runs, merging neighbours that share a style.
pub fn styled_runs(markup: &str, defaults: &CharStyle) -> Vec<Run> {
    let mut runs = Vec::new();
    walk(markup, defaults, &mut runs);
    runs
}
