//! Template export files.
//!
//! ```text
//! # Template Export
//! # Name: Lunch
//! # Description: Weekday menu
//! # Created: Wed Mar 05 14:30:00 UTC 2025
//! # Logo Path: logo.png          ┐
//! # Logo Width: 150               │ only with a logo
//! # Logo Alignment: CENTER        ┘
//! # ---- TEMPLATE CONTENT BELOW ----
//! [CENTER][BOLD]LUNCH[/BOLD]
//! ...
//! ```
//!
//! The content after the separator line is the markup, byte for byte.

use chrono::{DateTime, Utc};

use super::{DEFAULT_LOGO_ALIGNMENT, DEFAULT_LOGO_WIDTH, Logo, TemplateInfo};

pub const HEADER: &str = "# Template Export";
pub const SEPARATOR: &str = "# ---- TEMPLATE CONTENT BELOW ----\n";

const NAME: &str = "# Name: ";
const DESCRIPTION: &str = "# Description: ";
const CREATED: &str = "# Created: ";
const LOGO_PATH: &str = "# Logo Path: ";
const LOGO_WIDTH: &str = "# Logo Width: ";
const LOGO_ALIGNMENT: &str = "# Logo Alignment: ";

/// Description given to imports that carry none.
pub const IMPORTED_DESCRIPTION: &str = "Imported template";

/// Date format of the `Created` line, e.g. `Wed Mar 05 14:30:00 UTC 2025`.
pub const CREATED_FORMAT: &str = "%a %b %d %H:%M:%S %Z %Y";

/// Build the export file for a template.
///
/// Without stored metadata the description is empty and `created` is used
/// as the creation time.
pub fn export(name: &str, info: Option<&TemplateInfo>, content: &str, created: DateTime<Utc>) -> String {
    let description = info.map_or("", |info| info.description.as_str());
    let created = info.map_or(created, TemplateInfo::created);

    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    push_line(&mut out, NAME, name);
    push_line(&mut out, DESCRIPTION, description);
    push_line(&mut out, CREATED, &created.format(CREATED_FORMAT).to_string());

    if let Some(logo) = info.and_then(|info| info.logo.as_ref()) {
        push_line(&mut out, LOGO_PATH, &logo.path);
        push_line(&mut out, LOGO_WIDTH, &logo.width.to_string());
        push_line(&mut out, LOGO_ALIGNMENT, &logo.alignment);
    }

    out.push_str(SEPARATOR);
    out.push_str(content);
    out
}

fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(value);
    out.push('\n');
}

/// A template read back from an export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imported {
    pub content: String,
    pub description: String,
    pub logo: Option<Logo>,
}

/// Read an export file.
///
/// The content is everything after the separator line, or the whole file
/// when there is none. Metadata lines are only read from files that start
/// with the export header, and only above the separator.
pub fn parse(text: &str) -> Imported {
    let (header, content) = match text.split_once(SEPARATOR) {
        Some((header, content)) => (header, content),
        None => (text, text),
    };

    let mut imported = Imported {
        content: content.to_string(),
        description: IMPORTED_DESCRIPTION.to_string(),
        logo: None,
    };
    if !text.starts_with(HEADER) {
        return imported;
    }

    let mut logo_path = None;
    let mut logo_width = DEFAULT_LOGO_WIDTH;
    let mut logo_alignment = DEFAULT_LOGO_ALIGNMENT.to_string();

    for line in header.lines() {
        if let Some(value) = line.strip_prefix(DESCRIPTION) {
            imported.description = value.to_string();
        } else if let Some(value) = line.strip_prefix(LOGO_PATH) {
            logo_path = Some(value.to_string());
        } else if let Some(value) = line.strip_prefix(LOGO_WIDTH) {
            logo_width = value.parse().unwrap_or_else(|_| {
                tracing::debug!(value, "unreadable logo width");
                DEFAULT_LOGO_WIDTH
            });
        } else if let Some(value) = line.strip_prefix(LOGO_ALIGNMENT) {
            logo_alignment = value.to_string();
        }
    }

    imported.logo = logo_path.map(|path| Logo {
        path,
        width: logo_width,
        alignment: logo_alignment,
    });
    imported
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn march_5() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_export_without_info() {
        let out = export("Lunch", None, "[BOLD]SOUP[/BOLD]\n", march_5());
        assert_eq!(
            out,
            "# Template Export\n\
             # Name: Lunch\n\
             # Description: \n\
             # Created: Wed Mar 05 14:30:00 UTC 2025\n\
             # ---- TEMPLATE CONTENT BELOW ----\n\
             [BOLD]SOUP[/BOLD]\n"
        );
    }

    #[test]
    fn test_export_with_logo() {
        let info = TemplateInfo {
            display_name: "Lunch".into(),
            description: "Weekday menu".into(),
            created_date: march_5().timestamp_millis(),
            logo: Some(Logo {
                path: "logo.png".into(),
                width: 200,
                alignment: "LEFT".into(),
            }),
        };
        let out = export("Lunch", Some(&info), "x", Utc::now());
        assert!(out.contains(
            "# Created: Wed Mar 05 14:30:00 UTC 2025\n\
             # Logo Path: logo.png\n\
             # Logo Width: 200\n\
             # Logo Alignment: LEFT\n\
             # ---- TEMPLATE CONTENT BELOW ----\nx"
        ));
    }

    #[test]
    fn test_parse_reads_metadata() {
        let text = export(
            "Lunch",
            Some(&TemplateInfo {
                logo: Some(Logo::new("logo.png")),
                ..TemplateInfo::new("Lunch", "Weekday menu")
            }),
            "[CENTER]MENU\n",
            march_5(),
        );
        let imported = parse(&text);
        assert_eq!(imported.content, "[CENTER]MENU\n");
        assert_eq!(imported.description, "Weekday menu");
        assert_eq!(imported.logo, Some(Logo::new("logo.png")));
    }

    #[test]
    fn test_parse_plain_file() {
        let imported = parse("[BOLD]Hi[/BOLD]\n");
        assert_eq!(imported.content, "[BOLD]Hi[/BOLD]\n");
        assert_eq!(imported.description, "Imported template");
        assert_eq!(imported.logo, None);
    }

    #[test]
    fn test_parse_bad_logo_width() {
        let imported = parse(
            "# Template Export\n# Logo Path: a.png\n# Logo Width: wide\n# ---- TEMPLATE CONTENT BELOW ----\n",
        );
        assert_eq!(imported.logo.map(|l| l.width), Some(150));
    }

    #[test]
    fn test_metadata_ignored_without_header() {
        let imported = parse("# Description: nope\n# ---- TEMPLATE CONTENT BELOW ----\nbody");
        assert_eq!(imported.description, "Imported template");
        assert_eq!(imported.content, "body");
    }

    #[test]
    fn test_content_lines_are_not_metadata() {
        let imported = parse(
            "# Template Export\n# Description: real\n# ---- TEMPLATE CONTENT BELOW ----\n# Description: fake\n",
        );
        assert_eq!(imported.description, "real");
    }
}
