//! Line-start layout directives.

use crate::markup::{Token, split_leading_tags, tokenize};

pub const CENTER: &str = "[CENTER]";
pub const CENTER_CLOSE: &str = "[/CENTER]";
pub const RIGHT: &str = "[RIGHT]";
pub const RIGHT_CLOSE: &str = "[/RIGHT]";
pub const LINE: &str = "[LINE]";

/// A layout instruction found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// No directive; the configured default alignment applies.
    None,
    Center,
    Right,
    /// Full-width rule of `-`.
    Rule,
}

impl Directive {
    /// Split a line into its directive and the body to lay out.
    ///
    /// Channel tags in front of the directive (a line formatted as a whole
    /// in the editor) are kept at the front of the body. A trailing
    /// `[/CENTER]` or `[/RIGHT]` closer is dropped, keeping any channel tags
    /// after it.
    pub fn parse(line: &str) -> (Directive, String) {
        let (tags, rest) = split_leading_tags(line);

        let (directive, body) = if let Some(body) = rest.strip_prefix(CENTER) {
            (Directive::Center, strip_closer(body, CENTER_CLOSE))
        } else if let Some(body) = rest.strip_prefix(RIGHT) {
            (Directive::Right, strip_closer(body, RIGHT_CLOSE))
        } else if rest.starts_with(LINE) {
            (Directive::Rule, String::new())
        } else {
            return (Directive::None, line.to_string());
        };

        (directive, format!("{tags}{body}"))
    }
}

fn strip_closer(body: &str, closer: &str) -> String {
    let Some(at) = body.rfind(closer) else {
        return body.to_string();
    };

    let mut tags = String::new();
    for token in tokenize(&body[at + closer.len()..]) {
        match token {
            Token::Tag { raw, .. } => tags.push_str(raw),
            Token::Text(text) if text.trim().is_empty() => {}
            Token::Text(_) => return body.to_string(),
        }
    }
    format!("{}{}", &body[..at], tags)
}
