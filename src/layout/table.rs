//! Fixed-width table rows.
//!
//! ```text
//! Coffee|2|$4.50
//! ↓
//! Coffee               2          $4.50
//! ├──────── 20 ───────┤ ├── 10 ──┤ ├── 10 ──┤
//! ```

use super::truncate::truncate;
use crate::markup::{ChannelState, Token, tokenize, trim_visible, visible_length};

/// Visible width of the first column.
pub const FIRST_COLUMN_WIDTH: usize = 20;

/// Visible width of every other column.
pub const COLUMN_WIDTH: usize = 10;

/// True when the visible text contains a `|` separator.
pub fn is_table_row(line: &str) -> bool {
    tokenize(line).any(|token| matches!(token, Token::Text(text) if text.contains('|')))
}

fn column_width(index: usize) -> usize {
    if index == 0 {
        FIRST_COLUMN_WIDTH
    } else {
        COLUMN_WIDTH
    }
}

/// Split on `|` outside of tags. Trailing empty cells are dropped.
fn split_cells(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();

    for token in tokenize(row) {
        match token {
            Token::Tag { raw, .. } => current.push_str(raw),
            Token::Text(text) => {
                for (i, part) in text.split('|').enumerate() {
                    if i > 0 {
                        cells.push(std::mem::take(&mut current));
                    }
                    current.push_str(part);
                }
            }
        }
    }
    cells.push(current);

    while cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

/// Pad or truncate one cell to exactly `width` visible characters.
///
/// The cell is closed on its own: channels still open at its end are closed
/// before the padding.
fn fit_cell(cell: &str, width: usize) -> String {
    let len = visible_length(cell);
    if len > width {
        return truncate(cell, width);
    }
    let mut out = cell.to_string();
    out.push_str(&ChannelState::default().after(cell).closing_tags());
    out.push_str(&" ".repeat(width - len));
    out
}

/// Format a `|`-separated row into fixed-width columns joined by one space.
///
/// Formatting that spans a separator is reopened at the start of the next
/// cell.
pub fn format_table_row(row: &str) -> String {
    let cells = split_cells(row);
    let mut out = String::new();
    let mut carried = ChannelState::default();

    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let source = format!("{}{}", carried.opening_tags(), cell);
        carried = carried.after(cell);
        out.push_str(&fit_cell(&trim_visible(&source), column_width(i)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::tag_balance;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_three_columns() {
        let row = format_table_row("Coffee|2|$4.50");
        assert_eq!(row, format!("{:<20} {:<10} {:<10}", "Coffee", "2", "$4.50"));
        assert_eq!(visible_length(&row), 20 + 1 + 10 + 1 + 10);
    }

    #[test]
    fn test_two_columns() {
        let row = format_table_row("Coffee|$4.50");
        assert_eq!(visible_length(&row), 20 + 1 + 10);
    }

    #[test]
    fn test_cells_are_trimmed() {
        assert_eq!(format_table_row("  Tea  |  1 "), format!("{:<20} {:<10}", "Tea", "1"));
    }

    #[test]
    fn test_overflowing_cell_is_truncated() {
        let row = format_table_row("A very long product name|1");
        assert!(row.starts_with("A very long product "));
        assert_eq!(visible_length(&row), 31);
    }

    #[test]
    fn test_leading_pipe_keeps_empty_first_cell() {
        let row = format_table_row("| Coffee | 2 |");
        assert_eq!(row, format!("{:<20} {:<10} {:<10}", "", "Coffee", "2"));
    }

    #[test]
    fn test_tags_do_not_take_width() {
        let row = format_table_row("[BOLD]Total[/BOLD]|$9.00");
        assert_eq!(row, format!("[BOLD]Total[/BOLD]{} {:<10}", " ".repeat(15), "$9.00"));
    }

    #[test]
    fn test_formatting_across_separator_is_reopened() {
        let row = format_table_row("[BOLD]Total|$9.00[/BOLD]");
        assert_eq!(
            row,
            format!("[BOLD]Total[/BOLD]{} [BOLD]$9.00[/BOLD]     ", " ".repeat(15))
        );
        assert!(tag_balance(&row).is_balanced());
    }

    #[test]
    fn test_pipe_inside_font_name_is_not_a_separator() {
        assert!(!is_table_row("[FONT=A|B]x[/FONT]"));
        assert!(is_table_row("a|b"));
    }
}
