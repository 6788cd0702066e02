//! # Attribute Run Model
//!
//! Per-character formatting as the editor stores it: every character carries
//! a bold flag, a point size and a font family. Runs are a derived view over
//! consecutive characters that share all three attributes.
//!
//! ```
//! use slipmark::styled::{CharStyle, StyledChar, runs};
//!
//! let bold = CharStyle { bold: true, ..CharStyle::default() };
//! let chars: Vec<StyledChar> = "Hi".chars().map(|c| StyledChar::new(c, bold.clone())).collect();
//! assert_eq!(runs(&chars).len(), 1);
//! ```

mod text;

pub use text::{Selection, StyledText};

use serde::{Deserialize, Serialize};

/// Point size of unformatted text.
pub const DEFAULT_SIZE: u32 = 14;

/// Font family of unformatted text.
pub const DEFAULT_FAMILY: &str = "Courier New";

/// The three formatting attributes of one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharStyle {
    pub bold: bool,
    pub size: u32,
    pub family: String,
}

impl Default for CharStyle {
    fn default() -> Self {
        Self {
            bold: false,
            size: DEFAULT_SIZE,
            family: DEFAULT_FAMILY.to_string(),
        }
    }
}

impl CharStyle {
    /// Plain text in the given family at the default size.
    pub fn with_family(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Self::default()
        }
    }

    /// Family name with blank names treated as the default family.
    pub fn normalized_family(&self) -> &str {
        if self.family.trim().is_empty() {
            DEFAULT_FAMILY
        } else {
            &self.family
        }
    }
}

/// A single character and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledChar {
    pub ch: char,
    pub style: CharStyle,
}

impl StyledChar {
    pub fn new(ch: char, style: CharStyle) -> Self {
        Self { ch, style }
    }

    pub fn plain(ch: char) -> Self {
        Self::new(ch, CharStyle::default())
    }
}

/// A maximal stretch of characters sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(flatten)]
    pub style: CharStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: CharStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Expand the run back into per-character attributes.
    pub fn chars(&self) -> impl Iterator<Item = StyledChar> + '_ {
        self.text
            .chars()
            .map(|ch| StyledChar::new(ch, self.style.clone()))
    }
}

/// Group consecutive characters with identical attributes into runs.
pub fn runs(chars: &[StyledChar]) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::new();
    for sc in chars {
        match out.last_mut() {
            Some(run) if run.style == sc.style => run.text.push(sc.ch),
            _ => out.push(Run::new(sc.ch.to_string(), sc.style.clone())),
        }
    }
    out
}

/// Flatten runs into per-character attributes.
pub fn chars_of(runs: &[Run]) -> Vec<StyledChar> {
    runs.iter().flat_map(Run::chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> CharStyle {
        CharStyle {
            bold: true,
            ..CharStyle::default()
        }
    }

    #[test]
    fn test_default_style() {
        let style = CharStyle::default();
        assert!(!style.bold);
        assert_eq!(style.size, 14);
        assert_eq!(style.family, "Courier New");
    }

    #[test]
    fn test_runs_merge_identical_neighbours() {
        let mut chars: Vec<StyledChar> = "Hi".chars().map(|c| StyledChar::new(c, bold())).collect();
        chars.extend(" there".chars().map(StyledChar::plain));

        let runs = runs(&chars);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], Run::new("Hi", bold()));
        assert_eq!(runs[1], Run::new(" there", CharStyle::default()));
    }

    #[test]
    fn test_runs_of_empty_input() {
        assert!(runs(&[]).is_empty());
    }

    #[test]
    fn test_chars_of_inverts_runs() {
        let input = vec![Run::new("ab", bold()), Run::new("c", CharStyle::with_family("Arial"))];
        assert_eq!(runs(&chars_of(&input)), input);
    }

    #[test]
    fn test_blank_family_normalizes_to_default() {
        let style = CharStyle::with_family("  ");
        assert_eq!(style.normalized_family(), DEFAULT_FAMILY);
    }
}
