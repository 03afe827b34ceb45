//! Pretty-printed JSON panel with download support.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;

pub const DEFAULT_DOWNLOAD_NAME: &str = "insights.json";

#[derive(Debug, Clone, PartialEq)]
pub struct JsonView {
    pretty: String,
}

impl JsonView {
    pub fn new(value: &Value) -> Result<Self> {
        Ok(Self {
            pretty: serde_json::to_string_pretty(value)?,
        })
    }

    pub fn pretty(&self) -> &str {
        &self.pretty
    }

    /// Writes the document to `target`. A directory target receives
    /// `insights.json`. Returns the written path.
    pub fn download(&self, target: &Path) -> Result<PathBuf> {
        let path = if target.is_dir() {
            target.join(DEFAULT_DOWNLOAD_NAME)
        } else {
            target.to_path_buf()
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.pretty.as_bytes())?;
        tracing::debug!(path = %path.display(), bytes = self.pretty.len(), "wrote json download");
        Ok(path)
    }
}
