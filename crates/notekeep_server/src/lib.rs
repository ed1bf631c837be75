//! HTTP transport for notekeep.
//!
//! # Responsibility
//! - Map `/api/notes` requests onto `NoteService` operations.
//! - Load process configuration from the environment.
//!
//! # Invariants
//! - Only `NoteServiceError::NoteNotFound` becomes a 404; every other core
//!   failure becomes a 500.

pub mod config;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use routes::{build_router, AppState};
