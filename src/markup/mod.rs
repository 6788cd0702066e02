//! # Markup Codec
//!
//! Two-way transform between per-character attributes and the flat receipt
//! markup language.
//!
//! ## Tags
//!
//! | Channel | Open | Close | Default |
//! |---------|------|-------|---------|
//! | Bold | `[BOLD]` | `[/BOLD]` | off |
//! | Size | `[SIZE=n]` | `[/SIZE]` | 14 |
//! | Font | `[FONT=name]` | `[/FONT]` | Courier New |
//!
//! The channels are not nested with each other: each pair brackets exactly
//! the characters affected by that one channel, so
//! `[BOLD][SIZE=16]X[/BOLD][/SIZE]` is legal.
//!
//! ## Example
//!
//! ```
//! use slipmark::markup::{decode_runs, encode_runs, visible_length};
//!
//! let runs = decode_runs("[BOLD]Hi[/BOLD] there");
//! assert_eq!(runs.len(), 2);
//! assert_eq!(encode_runs(&runs), "[BOLD]Hi[/BOLD] there");
//! assert_eq!(visible_length("[BOLD]Hi[/BOLD] there"), 8);
//! ```

mod decode;
mod encode;
mod state;
pub mod token;
mod visible;

pub use decode::{decode, decode_runs};
pub use encode::{encode, encode_runs};
pub use state::ChannelState;
pub use token::{Channel, Tag, Token, split_leading_tags, tokenize};
pub use visible::{TagBalance, TagCount, strip_tags, tag_balance, trim_visible, visible_length};
