//! Unified path management for studio files.
//!
//! ```text
//! ~/.config/studio/            # Config directory
//! ├── config.toml              # StudioConfig
//! ├── state.toml               # Client state (session identifiers)
//! ├── samples/                 # Transcript previews, street segments
//! │   ├── sanitized.txt
//! │   ├── sensitive.txt
//! │   └── segments.geojson
//! └── logs/                    # Tracing output
//!     └── studio.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

use studio_core::StudioError;

const APP_DIR: &str = "studio";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for StudioError {
    fn from(e: PathError) -> Self {
        StudioError::config(e.to_string())
    }
}

/// Locations of studio files.
///
/// `StudioPaths::default_root()` resolves the platform config directory;
/// `StudioPaths::at(dir)` pins everything under an explicit root, which is
/// what tests use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioPaths {
    root: PathBuf,
}

impl StudioPaths {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `<config_dir>/studio`.
    pub fn default_root() -> Result<Self, PathError> {
        dirs::config_dir()
            .map(|dir| Self::at(dir.join(APP_DIR)))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_dir(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn state_file(&self) -> PathBuf {
        self.root.join("state.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Default location of transcript previews (`samples/<variant>.txt`).
    pub fn samples_dir(&self) -> PathBuf {
        self.root.join("samples")
    }

    pub fn segments_file(&self) -> PathBuf {
        self.samples_dir().join("segments.geojson")
    }
}
