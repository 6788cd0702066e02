//! # Slipmark - Receipt Markup and Layout
//!
//! Slipmark turns rich text into 42-column thermal receipts. It provides:
//!
//! - **Markup codec**: per-character bold/size/font ⇄ a flat tag language
//! - **Layout**: centering, right-alignment, rules, table columns and
//!   tag-safe truncation and wrapping
//! - **Auto-wrap**: line breaks inserted into the editor model as text is typed
//! - **Rendering**: preview runs, positioned print commands, PNG output
//! - **Templates**: a directory store and a portable export format
//!
//! ## Quick Start
//!
//! ```
//! use slipmark::{Composer, StyledText, Selection};
//!
//! let mut doc = StyledText::default();
//! doc.insert_str(0, "[CENTER]THANK YOU\nCoffee|2|$4.50");
//! doc.apply_bold(Selection::new(8, 17));
//!
//! let markup = doc.to_markup();
//! assert_eq!(markup, "[CENTER][BOLD]THANK YOU[/BOLD]\nCoffee|2|$4.50");
//!
//! let composer = Composer::default();
//! let laid_out = composer.format(&markup);
//! assert!(laid_out.starts_with("                [BOLD]THANK YOU[/BOLD]\n"));
//!
//! let job = composer.print(&markup)?;
//! assert_eq!(job.commands[0].text, "                ");
//! # Ok::<(), slipmark::SlipmarkError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`styled`] | Attribute run model and editor commands |
//! | [`markup`] | Tokenizer, encoder, decoder, visible length |
//! | [`layout`] | Line layout engine |
//! | [`wrap`] | Auto-wrap of the attribute run model |
//! | [`render`] | Render walker, preview and print renderers |
//! | [`canvas`] | Print job rasterization to PNG |
//! | [`template`] | Template store and export envelope |
//! | [`compose`] | End-to-end pipeline |
//! | [`config`] | JSON configuration |
//! | [`printer`] | Printer configurations |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Laid out for the Star TSP100 (80mm paper, 42 columns, 576 dots). Other
//! widths work by changing `max_width`.

pub mod canvas;
pub mod compose;
pub mod config;
pub mod error;
pub mod layout;
pub mod markup;
pub mod printer;
pub mod render;
pub mod styled;
pub mod template;
pub mod wrap;

// Re-exports for convenience
pub use compose::Composer;
pub use config::AppConfig;
pub use error::SlipmarkError;
pub use layout::{Alignment, LayoutConfig};
pub use printer::PrinterConfig;
pub use styled::{Selection, StyledText};
