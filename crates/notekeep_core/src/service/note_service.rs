//! Note use-case service.
//!
//! # Responsibility
//! - Provide list/get/create/update/patch/delete over any `NoteStore`.
//! - Translate absent ids into `NoteServiceError::NoteNotFound`.
//!
//! # Invariants
//! - Every id-taking operation re-fetches current state before mutating.
//! - Store failures propagate unchanged inside `NoteServiceError::Repo`.
//! - No operation retries.

use crate::model::note::{NewNote, Note, NoteDraft, NoteId, NotePatch};
use crate::repo::note_repo::{NoteStore, RepoError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over a store implementation chosen at startup.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists all notes in store order.
    pub fn list_notes(&self) -> NoteServiceResult<Vec<Note>> {
        Ok(self.store.list()?)
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: NoteId) -> NoteServiceResult<Note> {
        self.store
            .get(id)?
            .ok_or(NoteServiceError::NoteNotFound(id))
    }

    /// Creates a note; `imageUrl` stays unset unless the draft carries one.
    pub fn create_note(&self, draft: NoteDraft) -> NoteServiceResult<Note> {
        let created = self.store.insert(&NewNote::from(draft))?;
        info!("event=note_create module=service status=ok id={}", created.id);
        Ok(created)
    }

    /// Full update: title and content always, `imageUrl` only when non-null.
    pub fn update_note(&self, id: NoteId, draft: NoteDraft) -> NoteServiceResult<Note> {
        let mut note = self.get_note(id)?;
        note.apply_draft(draft);
        self.store.replace(&note)?;
        info!("event=note_update module=service status=ok id={id}");
        Ok(note)
    }

    /// Partial update: only keys present in `patch` are written.
    pub fn patch_note(&self, id: NoteId, patch: NotePatch) -> NoteServiceResult<Note> {
        let mut note = self.get_note(id)?;
        if patch.is_empty() {
            debug!("event=note_patch module=service status=noop id={id}");
        }
        note.apply_patch(patch);
        self.store.replace(&note)?;
        info!("event=note_patch module=service status=ok id={id}");
        Ok(note)
    }

    /// Deletes a note after confirming it exists.
    pub fn delete_note(&self, id: NoteId) -> NoteServiceResult<()> {
        self.get_note(id)?;
        self.store.remove(id)?;
        info!("event=note_delete module=service status=ok id={id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteService, NoteServiceError};
    use crate::model::note::{NewNote, Note, NoteDraft, NoteId};
    use crate::repo::note_repo::{NoteStore, RepoError, RepoResult};
    use std::cell::RefCell;

    /// Store double that fails every write after lookups succeed.
    struct ReadOnlyStore {
        note: Note,
        removals: RefCell<u32>,
    }

    impl NoteStore for ReadOnlyStore {
        fn insert(&self, _note: &NewNote) -> RepoResult<Note> {
            Err(RepoError::InvalidData("read-only".to_string()))
        }

        fn get(&self, id: NoteId) -> RepoResult<Option<Note>> {
            Ok((id == self.note.id).then(|| self.note.clone()))
        }

        fn replace(&self, _note: &Note) -> RepoResult<()> {
            Err(RepoError::InvalidData("read-only".to_string()))
        }

        fn remove(&self, _id: NoteId) -> RepoResult<()> {
            *self.removals.borrow_mut() += 1;
            Err(RepoError::InvalidData("read-only".to_string()))
        }

        fn list(&self) -> RepoResult<Vec<Note>> {
            Ok(vec![self.note.clone()])
        }
    }

    fn service() -> NoteService<ReadOnlyStore> {
        NoteService::new(ReadOnlyStore {
            note: Note {
                id: 1,
                title: Some("A".to_string()),
                content: Some("B".to_string()),
                image_url: None,
            },
            removals: RefCell::new(0),
        })
    }

    #[test]
    fn storage_failures_stay_distinct_from_not_found() {
        let service = service();

        let err = service
            .update_note(1, NoteDraft::new("x", "y"))
            .unwrap_err();
        assert!(matches!(err, NoteServiceError::Repo(RepoError::InvalidData(_))));

        let err = service.create_note(NoteDraft::new("x", "y")).unwrap_err();
        assert!(matches!(err, NoteServiceError::Repo(_)));
    }

    #[test]
    fn delete_skips_store_removal_when_note_is_absent() {
        let service = service();
        let err = service.delete_note(42).unwrap_err();
        assert!(matches!(err, NoteServiceError::NoteNotFound(42)));
        assert_eq!(*service.store.removals.borrow(), 0);

        assert!(matches!(
            service.delete_note(1),
            Err(NoteServiceError::Repo(_))
        ));
        assert_eq!(*service.store.removals.borrow(), 1);
    }
}
