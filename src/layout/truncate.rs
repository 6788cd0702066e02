//! Tag-safe truncation and markup line wrapping.

use crate::markup::{ChannelState, Token, strip_tags, tokenize};
use crate::wrap::find_wrap_point;

/// Markup cut at a visible-character budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut<'a> {
    /// Everything up to the cut, with every channel open at the cut closed.
    pub head: String,
    /// Channels open at the cut, before the synthesized closes.
    pub open: ChannelState,
    /// Unconsumed source text after the cut.
    pub rest: &'a str,
}

impl Cut<'_> {
    /// The rest of the line with the channels that were open at the cut reopened.
    pub fn continuation(&self) -> String {
        let mut out = self.open.opening_tags();
        out.push_str(self.rest);
        out
    }
}

/// Cut `text` after `max_visible` rendered characters.
///
/// Tags are copied verbatim without spending budget. Once the budget is
/// spent, closing tags that follow immediately are still absorbed into the
/// head; opening tags are left for the rest.
pub fn cut(text: &str, max_visible: usize) -> Cut<'_> {
    let mut head = String::new();
    let mut open = ChannelState::default();
    let mut remaining = max_visible;
    let mut pos = 0;

    for token in tokenize(text) {
        match token {
            Token::Tag { tag, raw } => {
                if remaining == 0 && tag.is_open() {
                    break;
                }
                head.push_str(raw);
                open.apply(&tag);
                pos += raw.len();
            }
            Token::Text(chunk) => {
                if remaining == 0 {
                    break;
                }
                let take = chunk
                    .char_indices()
                    .nth(remaining)
                    .map_or(chunk.len(), |(i, _)| i);
                head.push_str(&chunk[..take]);
                remaining -= chunk[..take].chars().count();
                pos += take;
                if take < chunk.len() {
                    break;
                }
            }
        }
    }

    open.write_transition(&ChannelState::default(), &mut head);
    Cut {
        head,
        open,
        rest: &text[pos..],
    }
}

/// Keep at most `max_visible` rendered characters, closing any channel left open.
///
/// ```
/// use slipmark::layout::truncate;
///
/// assert_eq!(truncate("[BOLD]HELLOWORLD[/BOLD]", 5), "[BOLD]HELLO[/BOLD]");
/// ```
pub fn truncate(text: &str, max_visible: usize) -> String {
    cut(text, max_visible).head
}

/// Break one markup line into lines of at most `max_width` visible characters.
///
/// Breaks after the last space that fits, or hard at `max_width`. Channels
/// open at a break are closed at the end of the line and reopened at the
/// start of the continuation, so every produced line is balanced on its own
/// when the input is.
pub fn wrap_markup(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let mut current = line.to_string();
    loop {
        let visible: Vec<char> = strip_tags(&current).chars().collect();
        if visible.len() <= max_width {
            out.push(current);
            return out;
        }
        let at = find_wrap_point(&visible, max_width);
        let cut = cut(&current, at);
        let next = cut.continuation();
        out.push(cut.head);
        current = next;
    }
}
