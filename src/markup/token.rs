//! Tokenizer for the six channel tags.
//!
//! Every consumer of markup (decode, visible length, truncation, the render
//! walker) goes through [`tokenize`], so they all agree on what a tag is.
//! Anything that is not a well-formed channel tag is literal text, including
//! layout directives such as `[CENTER]`.

pub const BOLD_OPEN: &str = "[BOLD]";
pub const BOLD_CLOSE: &str = "[/BOLD]";
pub const SIZE_OPEN_PREFIX: &str = "[SIZE=";
pub const SIZE_CLOSE: &str = "[/SIZE]";
pub const FONT_OPEN_PREFIX: &str = "[FONT=";
pub const FONT_CLOSE: &str = "[/FONT]";

/// One of the three independent formatting channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Bold,
    Size,
    Font,
}

/// A recognised channel tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag<'a> {
    BoldOpen,
    BoldClose,
    /// `None` when the digits do not fit a `u32`; consumers substitute
    /// their own default size.
    SizeOpen(Option<u32>),
    SizeClose,
    FontOpen(&'a str),
    FontClose,
}

impl Tag<'_> {
    pub fn channel(&self) -> Channel {
        match self {
            Tag::BoldOpen | Tag::BoldClose => Channel::Bold,
            Tag::SizeOpen(_) | Tag::SizeClose => Channel::Size,
            Tag::FontOpen(_) | Tag::FontClose => Channel::Font,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Tag::BoldOpen | Tag::SizeOpen(_) | Tag::FontOpen(_))
    }
}

/// A slice of markup: literal text or a tag together with its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Tag { tag: Tag<'a>, raw: &'a str },
}

/// Try to read a channel tag at the start of `s`.
///
/// Returns the tag and its length in bytes.
pub fn parse_tag(s: &str) -> Option<(Tag<'_>, usize)> {
    if !s.starts_with('[') {
        return None;
    }
    for (literal, tag) in [
        (BOLD_OPEN, Tag::BoldOpen),
        (BOLD_CLOSE, Tag::BoldClose),
        (SIZE_CLOSE, Tag::SizeClose),
        (FONT_CLOSE, Tag::FontClose),
    ] {
        if s.starts_with(literal) {
            return Some((tag, literal.len()));
        }
    }

    if let Some(rest) = s.strip_prefix(SIZE_OPEN_PREFIX) {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || rest.as_bytes().get(digits) != Some(&b']') {
            return None;
        }
        let value = rest[..digits].parse::<u32>().ok();
        return Some((Tag::SizeOpen(value), SIZE_OPEN_PREFIX.len() + digits + 1));
    }

    if let Some(rest) = s.strip_prefix(FONT_OPEN_PREFIX) {
        let end = rest.find([']', '\n'])?;
        if end == 0 || rest.as_bytes()[end] != b']' {
            return None;
        }
        return Some((Tag::FontOpen(&rest[..end]), FONT_OPEN_PREFIX.len() + end + 1));
    }

    None
}

/// Iterator over the tokens of a markup string.
///
/// Text tokens are maximal: two text tokens never follow each other.
pub struct Tokens<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.src[self.pos..];
        if rest.is_empty() {
            return None;
        }

        if let Some((tag, len)) = parse_tag(rest) {
            self.pos += len;
            return Some(Token::Tag {
                tag,
                raw: &rest[..len],
            });
        }

        // The first char is literal; the text runs until the next real tag.
        let first = rest.chars().next().map_or(1, char::len_utf8);
        let end = rest[first..]
            .match_indices('[')
            .map(|(i, _)| first + i)
            .find(|&at| parse_tag(&rest[at..]).is_some())
            .unwrap_or(rest.len());

        self.pos += end;
        Some(Token::Text(&rest[..end]))
    }
}

/// Split markup into text and tag tokens.
pub fn tokenize(src: &str) -> Tokens<'_> {
    Tokens { src, pos: 0 }
}

/// Split off the run of tags at the start of `src`.
pub fn split_leading_tags(src: &str) -> (&str, &str) {
    let len: usize = tokenize(src)
        .map_while(|token| match token {
            Token::Tag { raw, .. } => Some(raw.len()),
            Token::Text(_) => None,
        })
        .sum();
    src.split_at(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(src: &str) -> Vec<Token<'_>> {
        tokenize(src).collect()
    }

    #[test]
    fn test_plain_text_is_one_token() {
        assert_eq!(collect("hello"), vec![Token::Text("hello")]);
    }

    #[test]
    fn test_all_six_tags() {
        let tokens = collect("[BOLD][/BOLD][SIZE=16][/SIZE][FONT=Times New Roman][/FONT]");
        let tags: Vec<Tag> = tokens
            .into_iter()
            .map(|t| match t {
                Token::Tag { tag, .. } => tag,
                Token::Text(t) => panic!("unexpected text {t:?}"),
            })
            .collect();
        assert_eq!(
            tags,
            vec![
                Tag::BoldOpen,
                Tag::BoldClose,
                Tag::SizeOpen(Some(16)),
                Tag::SizeClose,
                Tag::FontOpen("Times New Roman"),
                Tag::FontClose,
            ]
        );
    }

    #[test]
    fn test_raw_is_source_slice() {
        let tokens = collect("a[SIZE=08]b");
        assert_eq!(
            tokens[1],
            Token::Tag {
                tag: Tag::SizeOpen(Some(8)),
                raw: "[SIZE=08]"
            }
        );
    }

    #[test]
    fn test_unterminated_size_is_literal() {
        assert_eq!(collect("[SIZE=12 hello"), vec![Token::Text("[SIZE=12 hello")]);
    }

    #[test]
    fn test_non_numeric_size_is_literal() {
        assert_eq!(collect("[SIZE=big]x"), vec![Token::Text("[SIZE=big]x")]);
    }

    #[test]
    fn test_overflowing_size_has_no_value() {
        let tokens = collect("[SIZE=99999999999]x");
        assert!(matches!(
            tokens[0],
            Token::Tag {
                tag: Tag::SizeOpen(None),
                ..
            }
        ));
    }

    #[test]
    fn test_empty_font_name_is_literal() {
        assert_eq!(collect("[FONT=]x"), vec![Token::Text("[FONT=]x")]);
    }

    #[test]
    fn test_font_tag_does_not_cross_newline() {
        assert_eq!(collect("[FONT=Ari\nal]"), vec![Token::Text("[FONT=Ari\nal]")]);
    }

    #[test]
    fn test_directives_are_literal_text() {
        assert_eq!(
            collect("[CENTER][BOLD]X"),
            vec![
                Token::Text("[CENTER]"),
                Token::Tag {
                    tag: Tag::BoldOpen,
                    raw: "[BOLD]"
                },
                Token::Text("X"),
            ]
        );
    }

    #[test]
    fn test_literal_bracket_followed_by_tag() {
        assert_eq!(
            collect("[x][BOLD]"),
            vec![
                Token::Text("[x]"),
                Token::Tag {
                    tag: Tag::BoldOpen,
                    raw: "[BOLD]"
                },
            ]
        );
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(collect("€[BOLD]é").len(), 3);
    }

    #[test]
    fn test_split_leading_tags() {
        assert_eq!(split_leading_tags("[BOLD][/SIZE]x[BOLD]"), ("[BOLD][/SIZE]", "x[BOLD]"));
        assert_eq!(split_leading_tags("plain"), ("", "plain"));
    }

    #[test]
    fn test_tag_channels() {
        assert_eq!(Tag::SizeClose.channel(), Channel::Size);
        assert!(Tag::FontOpen("Arial").is_open());
        assert!(!Tag::BoldClose.is_open());
    }
}
