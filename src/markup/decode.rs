//! Markup → attribute runs.

use super::state::ChannelState;
use super::token::{Token, tokenize};
use crate::styled::{Run, StyledChar, runs};

/// Parse a tag string back into per-character attributes.
///
/// Malformed tags are literal text, so this never fails.
pub fn decode(markup: &str) -> Vec<StyledChar> {
    let mut state = ChannelState::default();
    let mut out = Vec::with_capacity(markup.len());

    for token in tokenize(markup) {
        match token {
            Token::Text(text) => {
                let style = state.style();
                out.extend(text.chars().map(|ch| StyledChar::new(ch, style.clone())));
            }
            Token::Tag { tag, .. } => state.apply(&tag),
        }
    }

    out
}

/// Parse a tag string into runs.
pub fn decode_runs(markup: &str) -> Vec<Run> {
    runs(&decode(markup))
}
