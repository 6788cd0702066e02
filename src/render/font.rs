//! Font-family resolution and text measurement for the print path.
//!
//! ## Resolution order
//!
//! | Step | Rule | Example |
//! |------|------|---------|
//! | 1 | Exact match, ignoring case | `arial` → `Arial` |
//! | 2 | Substring match in either direction | `Arial Narrow` → `Arial` |
//! | 3 | Keyword table | `TimesNewRomanPS` → `Times New Roman` |
//! | 4 | Fallback | `Wingdings` → `Courier New` |
//!
//! Resolution never fails. Fallbacks are logged and printing continues.

use crate::styled::{CharStyle, DEFAULT_FAMILY};

/// Keyword → family substitutions tried when the catalog has no match.
pub const KEYWORD_FALLBACKS: &[(&str, &str)] = &[
    ("arial", "Arial"),
    ("times", "Times New Roman"),
    ("courier", "Courier New"),
];

/// Maps a requested family name to one the output device can draw.
pub trait FontResolver {
    fn resolve(&self, requested: &str) -> String;
}

/// A fixed list of available families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCatalog {
    families: Vec<String>,
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self::new(["Courier New", "Arial", "Times New Roman"])
    }
}

impl FontCatalog {
    pub fn new<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            families: families
                .into_iter()
                .map(Into::into)
                .filter(|f: &String| !f.trim().is_empty())
                .collect(),
        }
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }
}

impl FontResolver for FontCatalog {
    fn resolve(&self, requested: &str) -> String {
        resolve_family(&self.families, requested)
    }
}

/// Pick the available family that best matches `requested`.
pub fn resolve_family(available: &[String], requested: &str) -> String {
    let requested = requested.trim();
    let wanted = requested.to_lowercase();

    if let Some(found) = available.iter().find(|f| f.to_lowercase() == wanted) {
        return found.clone();
    }

    if !wanted.is_empty() {
        let partial = available.iter().find(|f| {
            let f = f.to_lowercase();
            f.contains(&wanted) || wanted.contains(&f)
        });
        if let Some(found) = partial {
            tracing::debug!(requested, using = %found, "closest font match");
            return found.clone();
        }
    }

    if let Some((_, family)) = KEYWORD_FALLBACKS
        .iter()
        .find(|(keyword, _)| wanted.contains(keyword))
    {
        tracing::debug!(requested, using = *family, "font keyword substitution");
        return (*family).to_string();
    }

    tracing::warn!(requested, using = DEFAULT_FAMILY, "font not found");
    DEFAULT_FAMILY.to_string()
}

/// Measures text for positioning draw commands.
pub trait TextMetrics {
    /// Horizontal advance of `text` drawn in `style`.
    fn advance(&self, text: &str, style: &CharStyle) -> u32;

    /// Distance between baselines for the given point size.
    fn line_height(&self, size: u32) -> u32;
}

/// Fixed-pitch metrics: every character is 0.6 em wide, lines are 1.2 em.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMetrics;

impl MonospaceMetrics {
    pub const ADVANCE_EM: f32 = 0.6;
    pub const LINE_HEIGHT_EM: f32 = 1.2;
}

impl TextMetrics for MonospaceMetrics {
    fn advance(&self, text: &str, style: &CharStyle) -> u32 {
        let chars = text.chars().count() as f32;
        (chars * style.size as f32 * Self::ADVANCE_EM).round() as u32
    }

    fn line_height(&self, size: u32) -> u32 {
        (size as f32 * Self::LINE_HEIGHT_EM).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FontCatalog {
        FontCatalog::new(["Courier New", "Arial", "Times New Roman", "DejaVu Sans Mono"])
    }

    #[test]
    fn test_exact_match_ignores_case() {
        assert_eq!(catalog().resolve("arial"), "Arial");
        assert_eq!(catalog().resolve("  TIMES NEW ROMAN "), "Times New Roman");
    }

    #[test]
    fn test_substring_match_either_direction() {
        assert_eq!(catalog().resolve("DejaVu"), "DejaVu Sans Mono");
        assert_eq!(catalog().resolve("Arial Narrow"), "Arial");
    }

    #[test]
    fn test_keyword_fallback() {
        let catalog = FontCatalog::new(["Helvetica"]);
        assert_eq!(catalog.resolve("TimesNewRomanPS"), "Times New Roman");
        assert_eq!(catalog.resolve("MyCourierFont"), "Courier New");
    }

    #[test]
    fn test_final_fallback() {
        assert_eq!(catalog().resolve("Wingdings"), "Courier New");
        assert_eq!(FontCatalog::new(Vec::<String>::new()).resolve(""), "Courier New");
    }

    #[test]
    fn test_blank_catalog_entries_are_dropped() {
        let catalog = FontCatalog::new(["", "Arial"]);
        assert_eq!(catalog.families(), &["Arial".to_string()]);
    }

    #[test]
    fn test_monospace_metrics() {
        let style = CharStyle {
            size: 10,
            ..CharStyle::default()
        };
        assert_eq!(MonospaceMetrics.advance("abcde", &style), 30);
        assert_eq!(MonospaceMetrics.line_height(12), 14);
    }
}
