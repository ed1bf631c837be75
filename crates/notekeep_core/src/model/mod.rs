//! Domain model for the note resource.
//!
//! # Invariants
//! - Every persisted note is identified by a store-assigned `NoteId`.
//! - Identity never changes across updates.

pub mod note;
