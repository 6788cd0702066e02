//! Attribute runs → markup.

use super::state::ChannelState;
use crate::styled::{CharStyle, Run, StyledChar};

/// Serialize per-character attributes into a flat tag string.
///
/// Default attributes (plain, 14pt, Courier New) are never written as tags.
/// Every channel still open after the last character is closed.
pub fn encode(chars: &[StyledChar]) -> String {
    encode_iter(chars.iter().map(|sc| (sc.ch, &sc.style)))
}

/// Serialize runs; equivalent to [`encode`] over their characters.
pub fn encode_runs(runs: &[Run]) -> String {
    encode_iter(
        runs.iter()
            .flat_map(|run| run.text.chars().map(move |ch| (ch, &run.style))),
    )
}

fn encode_iter<'a>(chars: impl Iterator<Item = (char, &'a CharStyle)>) -> String {
    let mut out = String::new();
    let mut state = ChannelState::default();
    let mut last_style: Option<&CharStyle> = None;

    for (ch, style) in chars {
        if last_style != Some(style) {
            let target = ChannelState::for_style(style);
            state.write_transition(&target, &mut out);
            state = target;
            last_style = Some(style);
        }
        out.push(ch);
    }

    state.write_transition(&ChannelState::default(), &mut out);
    out
}
