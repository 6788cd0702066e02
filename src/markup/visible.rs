//! Visible-length calculation and tag balance checks.

use super::token::{Channel, Token, tokenize};

/// Remove every channel tag, keeping literal text (directives included).
pub fn strip_tags(markup: &str) -> String {
    tokenize(markup)
        .filter_map(|token| match token {
            Token::Text(text) => Some(text),
            Token::Tag { .. } => None,
        })
        .collect()
}

/// Number of characters that will actually be rendered.
///
/// Width decisions in layout and wrapping are all made with this count, so
/// tag bytes never take up columns.
pub fn visible_length(markup: &str) -> usize {
    tokenize(markup)
        .map(|token| match token {
            Token::Text(text) => text.chars().count(),
            Token::Tag { .. } => 0,
        })
        .sum()
}

/// Trim leading and trailing whitespace from the visible text, keeping every tag.
pub fn trim_visible(markup: &str) -> String {
    let mut tokens: Vec<Token<'_>> = tokenize(markup).collect();

    for token in tokens.iter_mut() {
        if let Token::Text(text) = token {
            let current = *text;
            *text = current.trim_start();
            if !text.is_empty() {
                break;
            }
        }
    }
    for token in tokens.iter_mut().rev() {
        if let Token::Text(text) = token {
            let current = *text;
            *text = current.trim_end();
            if !text.is_empty() {
                break;
            }
        }
    }

    tokens
        .iter()
        .map(|token| match token {
            Token::Text(text) => *text,
            Token::Tag { raw, .. } => *raw,
        })
        .collect()
}

/// Open/close tag counts for one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagCount {
    pub opens: usize,
    pub closes: usize,
}

/// Tag counts for all three channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagBalance {
    pub bold: TagCount,
    pub size: TagCount,
    pub font: TagCount,
}

impl TagBalance {
    /// True when every channel has as many opens as closes.
    pub fn is_balanced(&self) -> bool {
        [self.bold, self.size, self.font]
            .iter()
            .all(|c| c.opens == c.closes)
    }
}

/// Count open and close tags per channel.
pub fn tag_balance(markup: &str) -> TagBalance {
    let mut balance = TagBalance::default();
    for token in tokenize(markup) {
        if let Token::Tag { tag, .. } = token {
            let count = match tag.channel() {
                Channel::Bold => &mut balance.bold,
                Channel::Size => &mut balance.size,
                Channel::Font => &mut balance.font,
            };
            if tag.is_open() {
                count.opens += 1;
            } else {
                count.closes += 1;
            }
        }
    }
    balance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_length_ignores_tags() {
        assert_eq!(visible_length("[BOLD]Hi[/BOLD] there"), 8);
        assert_eq!(visible_length("[SIZE=24][FONT=Arial]X[/FONT][/SIZE]"), 1);
    }

    #[test]
    fn test_visible_length_counts_directives() {
        assert_eq!(visible_length("[CENTER]ab"), 10);
    }

    #[test]
    fn test_visible_length_counts_chars_not_bytes() {
        assert_eq!(visible_length("€1,50"), 5);
    }

    #[test]
    fn test_malformed_tags_are_visible() {
        assert_eq!(visible_length("[SIZE=x]"), 8);
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("[BOLD]A[/BOLD][FONT=Arial]B[/FONT]"), "AB");
    }

    #[test]
    fn test_trim_visible_keeps_tags() {
        assert_eq!(trim_visible("  [BOLD] Coffee [/BOLD] "), "[BOLD]Coffee[/BOLD]");
        assert_eq!(trim_visible("   "), "");
    }

    #[test]
    fn test_balance() {
        assert!(tag_balance("[BOLD]a[SIZE=16]b[/BOLD][/SIZE]").is_balanced());
        let unbalanced = tag_balance("[FONT=Arial]a");
        assert!(!unbalanced.is_balanced());
        assert_eq!(unbalanced.font, TagCount { opens: 1, closes: 0 });
    }
}
