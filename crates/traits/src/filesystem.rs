//! JSON-file-backed template store for single-machine deployments.
//!
//! One pretty-printed JSON file per template under a base directory. The
//! serde round-trip keeps `sections` ordered and the logo embedded, which
//! is the whole store contract.
//!
//! # Security
//!
//! Template ids become file names, so ids containing path separators or
//! parent-directory components are rejected rather than resolved.

use crate::store::{StoreError, TemplateStore};
use siteform_schema::Template;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct JsonFileTemplateStore {
    base_dir: PathBuf,
}

impl JsonFileTemplateStore {
    /// Creates a store rooted at `base_dir`, creating the directory if it
    /// does not exist yet.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Resolves a template id to its file path, rejecting ids that would
    /// escape the base directory.
    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::Failed {
                id: id.to_string(),
                message: "template id must be alphanumeric with '-' or '_'".to_string(),
            });
        }
        Ok(self.base_dir.join(format!("{id}.json")))
    }
}

impl TemplateStore for JsonFileTemplateStore {
    fn get(&self, id: &str) -> Result<Template, StoreError> {
        let path = self.path_for(id)?;
        let content = fs::read_to_string(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                StoreError::TemplateNotFound(id.to_string())
            } else {
                StoreError::Io(err.to_string())
            }
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn upsert(&self, template: Template) -> Result<Template, StoreError> {
        let path = self.path_for(&template.id)?;
        let json = serde_json::to_string_pretty(&template)?;
        fs::write(&path, json)?;
        log::debug!("wrote template '{}' to {}", template.id, path.display());
        Ok(template)
    }

    fn list(&self) -> Result<Vec<Template>, StoreError> {
        let mut templates = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let content = fs::read_to_string(&path)?;
                match serde_json::from_str(&content) {
                    Ok(template) => templates.push(template),
                    Err(err) => {
                        // A corrupt file should not hide every other template.
                        log::warn!("skipping unreadable template {}: {err}", path.display());
                    }
                }
            }
        }
        templates.sort_by(|a: &Template, b: &Template| a.name.cmp(&b.name));
        Ok(templates)
    }

    fn name(&self) -> &'static str {
        "JsonFileTemplateStore"
    }
}
