//! Store layer: persistence contract for notes and its SQLite implementation.
//!
//! # Responsibility
//! - Define the keyed container the note service calls into.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - An absent id on lookup is `Ok(None)`, never an error.
//! - Store APIs surface `NotFound` only when a mutation matched no row.

pub mod note_repo;
