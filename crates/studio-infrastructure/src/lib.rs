//! Filesystem-backed services for the studio client: path layout, atomic
//! TOML storage, the persisted session identity, configuration and local
//! sample files.

pub mod config_service;
pub mod paths;
pub mod samples;
pub mod session_store;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::{PathError, StudioPaths};
pub use samples::{NO_PREVIEW_TEXT, SampleLibrary, load_segments};
pub use session_store::{ClientState, FileSessionStore};
