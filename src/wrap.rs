//! # Auto-Wrap
//!
//! Keeps every paragraph of the attribute run model within the printer's
//! column count by inserting line breaks as text is typed.
//!
//! Offsets are counted in visible characters. The model holds attributes,
//! not tags, so a paragraph's visible text is exactly its characters.
//!
//! ```
//! use slipmark::wrap::find_wrap_point;
//!
//! let mut line: Vec<char> = "x".repeat(50).chars().collect();
//! line[40] = ' ';
//! assert_eq!(find_wrap_point(&line, 42), 41);
//! ```

use crate::styled::StyledChar;

/// Where to break a line of visible characters so the head fits `max_width`.
///
/// Scans backward from `max_width` for a space and breaks right after it.
/// Without a space the break is hard at `max_width`. A line that already
/// fits returns its own length.
pub fn find_wrap_point(chars: &[char], max_width: usize) -> usize {
    if max_width == 0 || chars.len() <= max_width {
        return chars.len();
    }
    (1..=max_width)
        .rev()
        .find(|&i| chars[i] == ' ')
        .map_or(max_width, |i| (i + 1).min(max_width))
}

/// Start and end (exclusive, before the `\n`) of the paragraph holding `offset`.
pub fn paragraph_bounds(chars: &[StyledChar], offset: usize) -> (usize, usize) {
    let offset = offset.min(chars.len());
    let start = chars[..offset]
        .iter()
        .rposition(|sc| sc.ch == '\n')
        .map_or(0, |i| i + 1);
    let end = chars[offset..]
        .iter()
        .position(|sc| sc.ch == '\n')
        .map_or(chars.len(), |i| offset + i);
    (start, end)
}

/// Wrap the paragraph containing `offset` until every line of it fits.
///
/// Each break copies the attributes of the character it is inserted in
/// front of. Returns the offsets of the inserted breaks, in order.
pub fn wrap_paragraph(chars: &mut Vec<StyledChar>, offset: usize, max_width: usize) -> Vec<usize> {
    let mut breaks = Vec::new();
    if max_width == 0 {
        return breaks;
    }

    let (mut start, _) = paragraph_bounds(chars, offset);
    loop {
        let (_, end) = paragraph_bounds(chars, start);
        let line: Vec<char> = chars[start..end].iter().map(|sc| sc.ch).collect();
        if line.len() <= max_width {
            return breaks;
        }

        let at = start + find_wrap_point(&line, max_width);
        let style = chars[at].style.clone();
        chars.insert(at, StyledChar::new('\n', style));
        tracing::trace!(offset = at, "auto-wrap break");
        breaks.push(at);
        start = at + 1;
    }
}
