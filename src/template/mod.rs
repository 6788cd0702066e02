//! # Templates
//!
//! Saved receipts. A template is a markup string plus a little metadata,
//! kept in a directory by [`TemplateStore`] and moved between machines as a
//! self-describing text file (see [`envelope`]).
//!
//! ## On-disk layout
//!
//! ```text
//! templates/
//! ├── Daily_Special.template   markup, UTF-8
//! └── Daily_Special.info       TemplateInfo as JSON
//! ```
//!
//! File names come from [`sanitize_name`]; the original display name is
//! kept in the `.info` file.

pub mod envelope;
mod store;

pub use store::TemplateStore;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Logo width used when none is given or the stored one is unreadable.
pub const DEFAULT_LOGO_WIDTH: u32 = 150;

/// Logo alignment used when none is given.
pub const DEFAULT_LOGO_ALIGNMENT: &str = "CENTER";

/// An image printed above the receipt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub path: String,
    pub width: u32,
    pub alignment: String,
}

impl Logo {
    /// A logo at `path` with the default width and alignment.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            width: DEFAULT_LOGO_WIDTH,
            alignment: DEFAULT_LOGO_ALIGNMENT.to_string(),
        }
    }
}

/// Metadata stored next to a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
}

impl TemplateInfo {
    pub fn new(display_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            description: description.into(),
            created_date: Utc::now().timestamp_millis(),
            logo: None,
        }
    }

    /// Creation time; an unset or invalid timestamp reads as now.
    pub fn created(&self) -> DateTime<Utc> {
        match Utc.timestamp_millis_opt(self.created_date).single() {
            Some(date) if self.created_date > 0 => date,
            _ => Utc::now(),
        }
    }

    /// Creation time for listings, e.g. `Mar 05, 2025 14:30`.
    pub fn formatted_date(&self) -> String {
        self.created().format("%b %d, %Y %H:%M").to_string()
    }

    pub fn has_logo(&self) -> bool {
        self.logo
            .as_ref()
            .is_some_and(|logo| !logo.path.trim().is_empty())
    }
}

/// File-name stem for a template name: anything outside `[a-zA-Z0-9._-]`
/// becomes `_`.
///
/// ```
/// use slipmark::template::sanitize_name;
///
/// assert_eq!(sanitize_name("Daily Special #2"), "Daily_Special__2");
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
