//! Resource-manager services.
//!
//! # Responsibility
//! - Turn store calls into the note use-cases exposed to transports.
//! - Keep transports decoupled from storage details.

pub mod note_service;
