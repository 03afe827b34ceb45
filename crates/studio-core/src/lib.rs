//! Domain layer of the studio demos: session identity, run lifecycle,
//! result models, the cost estimator form and display mapping.
//!
//! This crate performs no network I/O. Remote services are reached through
//! `studio-interaction`; persistence lives in `studio-infrastructure`.

pub mod config;
pub mod error;
pub mod estimate;
pub mod identity;
pub mod insight;
pub mod parking;
pub mod render;
pub mod run;

// Re-export common error type
pub use error::{Result, StudioError};

pub use config::StudioConfig;
pub use identity::{SessionIdentity, SessionStore, get_or_create_session_id};
pub use run::{RunController, RunEvent, RunResult, RunStage, Variant};
