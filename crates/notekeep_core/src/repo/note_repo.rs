//! Note store contract and SQLite implementation.
//!
//! # Invariants
//! - Ids come from `INTEGER PRIMARY KEY AUTOINCREMENT` and are never reused,
//!   even after the highest row is deleted.
//! - `list` returns rows in ascending id order.
//! - One connection is shared behind a mutex; statements never interleave.

use crate::db::DbError;
use crate::model::note::{NewNote, Note, NoteId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    image_url
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable keyed container for notes.
pub trait NoteStore {
    /// Persists a new row and returns it with the assigned id.
    fn insert(&self, note: &NewNote) -> RepoResult<Note>;
    /// Looks up one note; `Ok(None)` when absent.
    fn get(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Overwrites the row sharing `note.id`.
    fn replace(&self, note: &Note) -> RepoResult<()>;
    /// Deletes the row with `id`.
    fn remove(&self, id: NoteId) -> RepoResult<()>;
    /// Returns every stored note.
    fn list(&self) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note store owning one migrated connection.
pub struct SqliteNoteStore {
    conn: Mutex<Connection>,
}

impl SqliteNoteStore {
    /// Wraps a connection returned by `open_db` or `open_db_in_memory`.
    ///
    /// # Errors
    /// - `InvalidData` when the `notes` table or one of its columns is missing.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_notes_table_ready(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // A panic mid-statement leaves SQLite itself consistent, so a poisoned
    // lock is still safe to reuse.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoteStore for SqliteNoteStore {
    fn insert(&self, note: &NewNote) -> RepoResult<Note> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO notes (title, content, image_url) VALUES (?1, ?2, ?3);",
            params![
                note.title.as_deref(),
                note.content.as_deref(),
                note.image_url.as_deref(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(note.clone().into_note(id))
    }

    fn get(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let conn = self.conn();
        let note = conn
            .query_row(
                &format!("{NOTE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_note_row,
            )
            .optional()?;
        Ok(note)
    }

    fn replace(&self, note: &Note) -> RepoResult<()> {
        let changed = self.conn().execute(
            "UPDATE notes
             SET
                title = ?1,
                content = ?2,
                image_url = ?3
             WHERE id = ?4;",
            params![
                note.title.as_deref(),
                note.content.as_deref(),
                note.image_url.as_deref(),
                note.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }

        Ok(())
    }

    fn remove(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM notes WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list(&self) -> RepoResult<Vec<Note>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        image_url: row.get("image_url")?,
    })
}

fn ensure_notes_table_ready(conn: &Connection) -> RepoResult<()> {
    let mut stmt = conn.prepare("PRAGMA table_info(notes);")?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }

    if columns.is_empty() {
        return Err(RepoError::InvalidData(
            "missing required table `notes`".to_string(),
        ));
    }

    for required in ["id", "title", "content", "image_url"] {
        if !columns.iter().any(|column| column == required) {
            return Err(RepoError::InvalidData(format!(
                "missing required column `notes.{required}`"
            )));
        }
    }

    Ok(())
}
