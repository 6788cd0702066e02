//! # Line Layout Engine
//!
//! Reformats raw markup for a fixed number of print columns. Directives are
//! consumed, table rows are padded into columns, and lines are aligned or
//! truncated, all without ever splitting a channel tag or leaving one open.
//!
//! ## Directives
//!
//! | Directive | Effect |
//! |-----------|--------|
//! | `[CENTER]text` | Center the rest of the line |
//! | `[RIGHT]text` | Right-align the rest of the line |
//! | `[LINE]` | Rule of `-` across the full width |
//! | `a\|b\|c` | Table row: 20-column first cell, 10-column others |
//!
//! ## Example
//!
//! ```
//! use slipmark::layout::{LayoutConfig, layout_line};
//!
//! let config = LayoutConfig { max_width: 10, ..LayoutConfig::default() };
//! assert_eq!(layout_line("[CENTER]TOTAL", &config), "  TOTAL");
//! assert_eq!(layout_line("[LINE]", &config), "----------");
//! ```

pub mod directive;
pub mod table;
mod truncate;

pub use directive::Directive;
pub use table::{format_table_row, is_table_row};
pub use truncate::{Cut, cut, truncate, wrap_markup};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::markup::{ChannelState, split_leading_tags, strip_tags, visible_length};

/// Columns of a standard 80mm thermal receipt.
pub const DEFAULT_MAX_WIDTH: usize = 42;

/// Horizontal alignment of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(format!("unknown alignment '{other}' (expected left, center or right)")),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alignment::Left => "LEFT",
            Alignment::Center => "CENTER",
            Alignment::Right => "RIGHT",
        })
    }
}

/// Where centering puts the leftover columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CenterPadding {
    /// `⌊rem/2⌋` spaces on the left, nothing on the right.
    #[default]
    Leading,
    /// `⌊rem/2⌋` on the left and the remainder on the right.
    Both,
}

impl FromStr for CenterPadding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leading" => Ok(CenterPadding::Leading),
            "both" => Ok(CenterPadding::Both),
            other => Err(format!("unknown center padding '{other}' (expected leading or both)")),
        }
    }
}

/// What happens to a left-aligned line wider than the paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Leave it alone.
    #[default]
    Keep,
    /// Clip it tag-safely to the width.
    Truncate,
    /// Break it into continuation lines.
    Wrap,
}

impl FromStr for Overflow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(Overflow::Keep),
            "truncate" => Ok(Overflow::Truncate),
            "wrap" => Ok(Overflow::Wrap),
            other => Err(format!("unknown overflow '{other}' (expected keep, truncate or wrap)")),
        }
    }
}

/// Layout parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub max_width: usize,
    pub default_alignment: Alignment,
    pub center_padding: CenterPadding,
    pub overflow: Overflow,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            default_alignment: Alignment::Left,
            center_padding: CenterPadding::Leading,
            overflow: Overflow::Keep,
        }
    }
}

impl LayoutConfig {
    /// Settings for the print path: overlong left-aligned lines are clipped.
    pub fn for_print(&self) -> Self {
        Self {
            overflow: match self.overflow {
                Overflow::Keep => Overflow::Truncate,
                other => other,
            },
            ..self.clone()
        }
    }
}

/// Lay out a single line (no embedded newline).
///
/// With [`Overflow::Wrap`] the result may hold several lines joined by `\n`.
pub fn layout_line(line: &str, config: &LayoutConfig) -> String {
    let (directive, body) = Directive::parse(line);
    layout_body(directive, &body, config).join("\n")
}

/// Lay out a whole document, one output line per `\n`-terminated line.
///
/// Trailing empty lines are dropped. Every output line is self-contained:
/// channels left open by earlier lines are reopened at its start, and
/// channels still open at its end are closed, so a truncation never leaves
/// the following lines in the wrong state. Lines without visible content
/// keep only their whitespace.
pub fn layout_document(text: &str, config: &LayoutConfig) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let mut out = String::new();
    let mut source = ChannelState::default();

    for line in lines {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let (directive, body) = Directive::parse(line);

        let visible = strip_tags(&body);
        if directive != Directive::Rule && visible.trim().is_empty() {
            out.push_str(&visible);
            out.push('\n');
        } else {
            // Fold the line's own leading tags into the reopened state.
            let (lead, rest) = split_leading_tags(&body);
            let body = format!("{}{}", source.after(lead).opening_tags(), rest);
            for laid in layout_body(directive, &body, config) {
                let dangling = ChannelState::default().after(&laid);
                out.push_str(&laid);
                out.push_str(&dangling.closing_tags());
                out.push('\n');
            }
        }

        source = source.after(line);
    }

    out
}

fn layout_body(directive: Directive, body: &str, config: &LayoutConfig) -> Vec<String> {
    let width = config.max_width;

    if directive == Directive::Rule {
        return vec!["-".repeat(width)];
    }

    // Blank lines and lines holding nothing but tags pass through.
    if strip_tags(body).trim().is_empty() {
        return vec![body.to_string()];
    }

    let body = if is_table_row(body) {
        format_table_row(body)
    } else {
        body.to_string()
    };

    let alignment = match directive {
        Directive::Center => Alignment::Center,
        Directive::Right => Alignment::Right,
        _ => config.default_alignment,
    };

    match alignment {
        Alignment::Center => vec![center(&body, width, config.center_padding)],
        Alignment::Right => vec![right_align(&body, width)],
        Alignment::Left => match config.overflow {
            Overflow::Keep => vec![body],
            Overflow::Truncate if visible_length(&body) > width => vec![truncate(&body, width)],
            Overflow::Truncate => vec![body],
            Overflow::Wrap => wrap_markup(&body, width),
        },
    }
}

/// Center `text` within `width` columns, truncating when it does not fit.
pub fn center(text: &str, width: usize, padding: CenterPadding) -> String {
    let len = visible_length(text);
    if len >= width {
        return truncate(text, width);
    }
    let rem = width - len;
    let left = rem / 2;
    match padding {
        CenterPadding::Leading => format!("{}{}", " ".repeat(left), text),
        // Right padding is always plain.
        CenterPadding::Both => format!(
            "{}{}{}{}",
            " ".repeat(left),
            text,
            ChannelState::default().after(text).closing_tags(),
            " ".repeat(rem - left)
        ),
    }
}

/// Right-align `text` within `width` columns, truncating when it does not fit.
pub fn right_align(text: &str, width: usize) -> String {
    let len = visible_length(text);
    if len >= width {
        return truncate(text, width);
    }
    format!("{}{}", " ".repeat(width - len), text)
}
