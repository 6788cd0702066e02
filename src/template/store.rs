//! Directory-backed template storage.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::envelope;
use super::{Logo, TemplateInfo, sanitize_name};
use crate::error::SlipmarkError;

const TEMPLATE_EXTENSION: &str = "template";
const INFO_EXTENSION: &str = "info";

/// Templates kept as `<name>.template` + `<name>.info` pairs in one directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Open a store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SlipmarkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str, extension: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", sanitize_name(name), extension))
    }

    /// Save a template, replacing any with the same file name.
    pub fn save(
        &self,
        name: &str,
        content: &str,
        description: &str,
        logo: Option<Logo>,
    ) -> Result<(), SlipmarkError> {
        if name.trim().is_empty() {
            return Err(SlipmarkError::Template("template name is empty".into()));
        }

        fs::write(self.path(name, TEMPLATE_EXTENSION), content)?;
        let info = TemplateInfo {
            logo,
            ..TemplateInfo::new(name, description)
        };
        fs::write(
            self.path(name, INFO_EXTENSION),
            serde_json::to_string_pretty(&info)?,
        )?;

        tracing::info!(name, dir = %self.dir.display(), "saved template");
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<String, SlipmarkError> {
        let path = self.path(name, TEMPLATE_EXTENSION);
        if !path.exists() {
            return Err(SlipmarkError::Template(format!("template '{name}' not found")));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Stored metadata, or `None` when there is no readable `.info` file.
    pub fn info(&self, name: &str) -> Option<TemplateInfo> {
        let path = self.path(name, INFO_EXTENSION);
        let text = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&text) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable template info");
                None
            }
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name, TEMPLATE_EXTENSION).exists()
    }

    /// Delete a template and its metadata. Returns whether the template existed.
    pub fn delete(&self, name: &str) -> Result<bool, SlipmarkError> {
        let existed = remove_if_exists(&self.path(name, TEMPLATE_EXTENSION))?;
        remove_if_exists(&self.path(name, INFO_EXTENSION))?;
        Ok(existed)
    }

    /// Display names of every template, sorted.
    ///
    /// Templates without readable metadata are listed by file name.
    pub fn list(&self) -> Result<Vec<String>, SlipmarkError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            names.push(
                self.info(stem)
                    .map_or_else(|| stem.to_string(), |info| info.display_name),
            );
        }
        names.sort();
        Ok(names)
    }

    /// Write a template to an export file.
    pub fn export(&self, name: &str, file: &Path) -> Result<(), SlipmarkError> {
        let content = self.load(name)?;
        let info = self.info(name);
        fs::write(file, envelope::export(name, info.as_ref(), &content, Utc::now()))?;
        Ok(())
    }

    /// Read an export file (or any markup file) and save it as `name`.
    pub fn import(&self, file: &Path, name: &str) -> Result<(), SlipmarkError> {
        let imported = envelope::parse(&fs::read_to_string(file)?);
        self.save(name, &imported.content, &imported.description, imported.logo)
    }
}

fn remove_if_exists(path: &Path) -> Result<bool, SlipmarkError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
