//! # Configuration
//!
//! Everything tunable, loaded from one JSON file. Every field has a default,
//! so `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "layout": { "max_width": 42, "default_alignment": "center", "center_padding": "both" },
//!   "render": { "font_size": 12, "line_spacing": 1.5, "base_family": "Arial" },
//!   "fonts": ["Courier New", "Arial", "Times New Roman"],
//!   "template_dir": "templates"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SlipmarkError;
use crate::layout::LayoutConfig;
use crate::render::{FontCatalog, RenderConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    /// Families the print path may resolve `[FONT=...]` names to.
    pub fonts: Vec<String>,
    pub template_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
            fonts: FontCatalog::default().families().to_vec(),
            template_dir: PathBuf::from("templates"),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, SlipmarkError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reject values the layout and render paths cannot work with.
    pub fn validate(&self) -> Result<(), SlipmarkError> {
        if self.layout.max_width == 0 {
            return Err(SlipmarkError::Config("layout.max_width must be at least 1".into()));
        }
        if self.render.font_size == 0 {
            return Err(SlipmarkError::Config("render.font_size must be at least 1".into()));
        }
        if !self.render.line_spacing.is_finite() || self.render.line_spacing <= 0.0 {
            return Err(SlipmarkError::Config("render.line_spacing must be positive".into()));
        }
        if !self.render.preview_scale.is_finite() || self.render.preview_scale <= 0.0 {
            return Err(SlipmarkError::Config("render.preview_scale must be positive".into()));
        }
        Ok(())
    }

    pub fn font_catalog(&self) -> FontCatalog {
        FontCatalog::new(self.fonts.iter().cloned())
    }
}
