//! Per-channel open/closed state of a markup stream.

use std::fmt::Write;

use super::token::{
    BOLD_CLOSE, BOLD_OPEN, FONT_CLOSE, FONT_OPEN_PREFIX, SIZE_CLOSE, SIZE_OPEN_PREFIX, Tag, Token,
    tokenize,
};
use crate::styled::{CharStyle, DEFAULT_FAMILY, DEFAULT_SIZE};

/// Which channels are open at a point in a markup stream, and with what value.
///
/// A channel is open while `bold` is true or `size`/`font` is `Some`. The
/// three channels are independent state machines; a tag only ever touches
/// its own channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelState {
    pub bold: bool,
    pub size: Option<u32>,
    pub font: Option<String>,
}

impl ChannelState {
    /// The state needed to render `style`. Default values leave the channel closed.
    pub fn for_style(style: &CharStyle) -> Self {
        let family = style.normalized_family();
        Self {
            bold: style.bold,
            size: (style.size != DEFAULT_SIZE).then_some(style.size),
            font: (family != DEFAULT_FAMILY).then(|| family.to_string()),
        }
    }

    /// Resolve to concrete attributes using the document defaults.
    pub fn style(&self) -> CharStyle {
        CharStyle {
            bold: self.bold,
            size: self.size.unwrap_or(DEFAULT_SIZE),
            family: self
                .font
                .clone()
                .unwrap_or_else(|| DEFAULT_FAMILY.to_string()),
        }
    }

    pub fn is_default(&self) -> bool {
        !self.bold && self.size.is_none() && self.font.is_none()
    }

    /// Apply one tag. Closing tags reset their channel to the default.
    pub fn apply(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::BoldOpen => self.bold = true,
            Tag::BoldClose => self.bold = false,
            Tag::SizeOpen(value) => self.size = Some(value.unwrap_or(DEFAULT_SIZE)),
            Tag::SizeClose => self.size = None,
            Tag::FontOpen(name) => self.font = Some((*name).to_string()),
            Tag::FontClose => self.font = None,
        }
    }

    /// The state after applying every tag in `markup`, starting from `self`.
    pub fn after(&self, markup: &str) -> ChannelState {
        let mut state = self.clone();
        for token in tokenize(markup) {
            if let Token::Tag { tag, .. } = token {
                state.apply(&tag);
            }
        }
        state
    }

    /// Append the tags that move from `self` to `target`.
    ///
    /// Channels are visited bold, size, font. A changed size or font closes
    /// the current value before opening the new one.
    pub fn write_transition(&self, target: &ChannelState, out: &mut String) {
        if self.bold != target.bold {
            out.push_str(if target.bold { BOLD_OPEN } else { BOLD_CLOSE });
        }

        if self.size != target.size {
            if self.size.is_some() {
                out.push_str(SIZE_CLOSE);
            }
            if let Some(size) = target.size {
                let _ = write!(out, "{SIZE_OPEN_PREFIX}{size}]");
            }
        }

        if self.font != target.font {
            if self.font.is_some() {
                out.push_str(FONT_CLOSE);
            }
            if let Some(font) = &target.font {
                out.push_str(FONT_OPEN_PREFIX);
                out.push_str(font);
                out.push(']');
            }
        }
    }

    pub fn transition_to(&self, target: &ChannelState) -> String {
        let mut out = String::new();
        self.write_transition(target, &mut out);
        out
    }

    /// Close tags for every open channel.
    pub fn closing_tags(&self) -> String {
        self.transition_to(&ChannelState::default())
    }

    /// Open tags that re-establish this state from the default.
    pub fn opening_tags(&self) -> String {
        ChannelState::default().transition_to(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_style_defaults_are_closed() {
        assert!(ChannelState::for_style(&CharStyle::default()).is_default());
    }

    #[test]
    fn test_for_style_non_defaults_are_open() {
        let state = ChannelState::for_style(&CharStyle {
            bold: true,
            size: 20,
            family: "Arial".into(),
        });
        assert_eq!(
            state,
            ChannelState {
                bold: true,
                size: Some(20),
                font: Some("Arial".into())
            }
        );
    }

    #[test]
    fn test_transition_order_and_close_before_open() {
        let from = ChannelState {
            bold: false,
            size: Some(16),
            font: Some("Arial".into()),
        };
        let to = ChannelState {
            bold: true,
            size: Some(20),
            font: None,
        };
        assert_eq!(from.transition_to(&to), "[BOLD][/SIZE][SIZE=20][/FONT]");
    }

    #[test]
    fn test_opening_and_closing_tags() {
        let state = ChannelState {
            bold: true,
            size: Some(18),
            font: Some("Times New Roman".into()),
        };
        assert_eq!(state.opening_tags(), "[BOLD][SIZE=18][FONT=Times New Roman]");
        assert_eq!(state.closing_tags(), "[/BOLD][/SIZE][/FONT]");
    }

    #[test]
    fn test_after_scans_tags() {
        let state = ChannelState::default().after("[BOLD]a[SIZE=16]b[/BOLD]");
        assert_eq!(
            state,
            ChannelState {
                bold: false,
                size: Some(16),
                font: None
            }
        );
    }

    #[test]
    fn test_apply_overflowed_size_uses_default() {
        let mut state = ChannelState::default();
        state.apply(&Tag::SizeOpen(None));
        assert_eq!(state.size, Some(DEFAULT_SIZE));
        state.apply(&Tag::SizeClose);
        assert!(state.is_default());
    }
}
