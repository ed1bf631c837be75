//! Core resource management for notekeep.
//! This crate owns the note model, the store contract, and the business rules
//! for create/read/update/partial-update/delete.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{NewNote, Note, NoteDraft, NoteId, NotePatch};
pub use repo::note_repo::{NoteStore, RepoError, RepoResult, SqliteNoteStore};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
