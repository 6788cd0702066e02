//! The editable document: styled characters plus the editor's formatting commands.

use std::ops::Range;

use super::{CharStyle, DEFAULT_SIZE, Run, StyledChar, runs};
use crate::layout::DEFAULT_MAX_WIDTH;
use crate::markup::{decode, encode};
use crate::wrap::{paragraph_bounds, wrap_paragraph};

/// A `[start, end)` range of character offsets.
///
/// `start == end` is a caret: formatting commands then change the style
/// used for newly typed text instead of existing characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Selection between two offsets, in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    fn clamp(&self, len: usize) -> Range<usize> {
        self.start.min(len)..self.end.min(len)
    }
}

/// Per-character styled text as the editor holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledText {
    chars: Vec<StyledChar>,
    input_style: CharStyle,
    base_family: Option<String>,
    max_width: usize,
}

impl Default for StyledText {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WIDTH)
    }
}

impl StyledText {
    /// Empty document that wraps paragraphs at `max_width` columns.
    pub fn new(max_width: usize) -> Self {
        Self {
            chars: Vec::new(),
            input_style: CharStyle::default(),
            base_family: None,
            max_width,
        }
    }

    /// Load previously saved markup for editing.
    ///
    /// Loading does not wrap: saved templates keep their own line breaks.
    pub fn from_markup(markup: &str, max_width: usize) -> Self {
        Self {
            chars: decode(markup),
            ..Self::new(max_width)
        }
    }

    pub fn to_markup(&self) -> String {
        encode(&self.chars)
    }

    pub fn runs(&self) -> Vec<Run> {
        runs(&self.chars)
    }

    pub fn chars(&self) -> &[StyledChar] {
        &self.chars
    }

    /// The characters without formatting.
    pub fn text(&self) -> String {
        self.chars.iter().map(|sc| sc.ch).collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// True when there is nothing but whitespace to print.
    pub fn is_blank(&self) -> bool {
        self.chars.iter().all(|sc| sc.ch.is_whitespace())
    }

    pub fn input_style(&self) -> &CharStyle {
        &self.input_style
    }

    /// Family chosen with [`StyledText::set_all_font`], if any.
    pub fn base_family(&self) -> Option<&str> {
        self.base_family.as_deref()
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Character range of the paragraph holding `offset`, without its `\n`.
    pub fn paragraph_range(&self, offset: usize) -> Range<usize> {
        let (start, end) = paragraph_bounds(&self.chars, offset);
        start..end
    }

    /// Insert text in the input style, then wrap every paragraph it touched.
    ///
    /// Returns the offsets of the line breaks added by wrapping.
    pub fn insert_str(&mut self, offset: usize, text: &str) -> Vec<usize> {
        let offset = offset.min(self.chars.len());
        let inserted: Vec<StyledChar> = text
            .chars()
            .map(|ch| StyledChar::new(ch, self.input_style.clone()))
            .collect();
        let mut insert_end = offset + inserted.len();
        self.chars.splice(offset..offset, inserted);

        let mut breaks = Vec::new();
        let mut pos = offset;
        loop {
            let added = wrap_paragraph(&mut self.chars, pos, self.max_width);
            insert_end += added.len();
            let from = added.last().map_or(pos, |b| b + 1);
            breaks.extend(added);

            let (_, end) = paragraph_bounds(&self.chars, from);
            if end >= insert_end || end >= self.chars.len() {
                return breaks;
            }
            pos = end + 1;
        }
    }

    /// Remove a range of characters. Out-of-range bounds are clamped.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.chars.len();
        let range = range.start.min(len)..range.end.min(len);
        if range.start < range.end {
            self.chars.drain(range);
        }
    }

    /// Empty the document and reset the typing style.
    pub fn clear(&mut self) {
        self.chars.clear();
        self.input_style = CharStyle::default();
        self.base_family = None;
    }

    pub fn apply_bold(&mut self, selection: Selection) {
        self.restyle(selection, |style| style.bold = true);
    }

    pub fn apply_plain(&mut self, selection: Selection) {
        self.restyle(selection, |style| style.bold = false);
    }

    /// Change the family of the selection, keeping its other attributes.
    ///
    /// Text typed afterwards uses the family too.
    pub fn set_font(&mut self, selection: Selection, family: &str) {
        self.restyle(selection, |style| style.family = family.to_string());
        self.input_style.family = family.to_string();
    }

    pub fn set_size(&mut self, selection: Selection, size: u32) {
        self.restyle(selection, |style| style.size = size);
    }

    /// Reset the whole document to plain text in `family` at the default size.
    pub fn set_all_font(&mut self, family: &str) {
        let style = CharStyle::with_family(family);
        for sc in &mut self.chars {
            sc.style = style.clone();
        }
        self.input_style = style;
        self.base_family = Some(family.to_string());
        tracing::debug!(family, "document font reset");
    }

    /// True when any selected character is bold.
    pub fn is_selection_bold(&self, selection: Selection) -> bool {
        self.any_selected(selection, |style| style.bold)
    }

    /// True when any selected character is not bold.
    pub fn is_selection_plain(&self, selection: Selection) -> bool {
        self.any_selected(selection, |style| !style.bold)
    }

    /// Size of the first selected character.
    pub fn selection_font_size(&self, selection: Selection) -> u32 {
        if selection.is_empty() {
            return self.input_style.size;
        }
        self.chars
            .get(selection.start)
            .map_or(DEFAULT_SIZE, |sc| sc.style.size)
    }

    fn restyle(&mut self, selection: Selection, f: impl Fn(&mut CharStyle)) {
        if selection.is_empty() {
            f(&mut self.input_style);
            return;
        }
        let range = selection.clamp(self.chars.len());
        for sc in &mut self.chars[range] {
            f(&mut sc.style);
        }
    }

    fn any_selected(&self, selection: Selection, f: impl Fn(&CharStyle) -> bool) -> bool {
        if selection.is_empty() {
            return f(&self.input_style);
        }
        let range = selection.clamp(self.chars.len());
        self.chars[range].iter().any(|sc| f(&sc.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> StyledText {
        let mut doc = StyledText::default();
        doc.insert_str(0, text);
        doc
    }

    #[test]
    fn test_bold_selection_encodes() {
        let mut doc = doc("Hi there");
        doc.apply_bold(Selection::new(0, 2));
        assert_eq!(doc.to_markup(), "[BOLD]Hi[/BOLD] there");
    }

    #[test]
    fn test_caret_changes_input_style() {
        let mut doc = doc("Hi");
        doc.apply_bold(Selection::caret(2));
        doc.insert_str(2, "!");
        assert_eq!(doc.to_markup(), "Hi[BOLD]![/BOLD]");
        assert!(doc.is_selection_bold(Selection::caret(3)));
    }

    #[test]
    fn test_plain_removes_bold() {
        let mut doc = StyledText::from_markup("[BOLD]abc[/BOLD]", 42);
        doc.apply_plain(Selection::new(1, 2));
        assert_eq!(doc.to_markup(), "[BOLD]a[/BOLD]b[BOLD]c[/BOLD]");
    }

    #[test]
    fn test_selection_queries_match_any_char() {
        let doc = StyledText::from_markup("[BOLD]ab[/BOLD]cd", 42);
        let sel = Selection::new(1, 3);
        assert!(doc.is_selection_bold(sel));
        assert!(doc.is_selection_plain(sel));
        assert!(!doc.is_selection_plain(Selection::new(0, 2)));
    }

    #[test]
    fn test_set_font_keeps_other_attributes() {
        let mut doc = StyledText::from_markup("[BOLD][SIZE=20]ab[/SIZE][/BOLD]", 42);
        doc.set_font(Selection::new(0, 1), "Arial");
        assert_eq!(
            doc.to_markup(),
            "[BOLD][SIZE=20][FONT=Arial]a[/FONT]b[/BOLD][/SIZE]"
        );
        assert_eq!(doc.input_style().family, "Arial");
    }

    #[test]
    fn test_set_size_and_query() {
        let mut doc = doc("abc");
        doc.set_size(Selection::new(1, 3), 18);
        assert_eq!(doc.selection_font_size(Selection::new(1, 2)), 18);
        assert_eq!(doc.selection_font_size(Selection::caret(0)), 14);
        assert_eq!(doc.to_markup(), "a[SIZE=18]bc[/SIZE]");
    }

    #[test]
    fn test_set_all_font_resets_formatting() {
        let mut doc = StyledText::from_markup("[BOLD][SIZE=20]ab[/SIZE][/BOLD]", 42);
        doc.set_all_font("Arial");
        assert_eq!(doc.to_markup(), "[FONT=Arial]ab[/FONT]");
        assert_eq!(doc.base_family(), Some("Arial"));
        assert_eq!(doc.input_style(), &CharStyle::with_family("Arial"));
    }

    #[test]
    fn test_insert_wraps_long_paragraph() {
        let mut text = "a".repeat(50);
        text.replace_range(40..41, " ");
        let mut doc = StyledText::default();
        let breaks = doc.insert_str(0, &text);
        assert_eq!(breaks, vec![41]);
        assert_eq!(doc.len(), 51);
    }

    #[test]
    fn test_insert_wraps_every_touched_paragraph() {
        let mut doc = StyledText::new(5);
        let text = format!("{}\n{}\nok", "a".repeat(7), "b".repeat(7));
        let breaks = doc.insert_str(0, &text);
        assert_eq!(breaks, vec![5, 14]);
        assert_eq!(doc.text(), "aaaaa\naa\nbbbbb\nbb\nok");
    }

    #[test]
    fn test_typing_into_middle_wraps_paragraph() {
        let mut doc = StyledText::new(10);
        doc.insert_str(0, "hello world");
        assert_eq!(doc.text(), "hello \nworld");
        doc.insert_str(5, "!!");
        assert_eq!(doc.text(), "hello!! \nworld");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut doc = doc("abcdef");
        doc.remove(1..3);
        assert_eq!(doc.text(), "adef");
        doc.remove(3..99);
        assert_eq!(doc.text(), "ade");

        doc.apply_bold(Selection::caret(0));
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.input_style(), &CharStyle::default());
    }

    #[test]
    fn test_paragraph_range() {
        let doc = doc("ab\ncd");
        assert_eq!(doc.paragraph_range(4), 3..5);
    }

    #[test]
    fn test_round_trip_through_markup() {
        let markup = "[FONT=Times New Roman]T[/FONT]ab[BOLD][SIZE=9]c[/BOLD]d[/SIZE]";
        let doc = StyledText::from_markup(markup, 42);
        assert_eq!(doc.to_markup(), markup);
    }

    #[test]
    fn test_blank_document() {
        assert!(doc(" \n ").is_blank());
        assert!(!doc("x").is_blank());
    }
}
