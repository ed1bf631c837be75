//! Note entity, write payloads, and partial-update merge rules.
//!
//! # Responsibility
//! - Define the persisted note record and the create/update payloads.
//! - Own field-merge semantics for full and partial updates.
//!
//! # Invariants
//! - `id` is assigned by the store and never modified by merge helpers.
//! - A partial update touches only the fields present in the request; an
//!   explicit `null` is a present value that clears the field.
//! - A full update ignores an explicit `null` `imageUrl`.

use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned integer identity of a note.
pub type NoteId = i64;

/// Persisted note record as returned by every read path.
///
/// `title` and `content` are required on create and full update, but a
/// partial update may clear them, so the read model keeps them nullable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

/// Payload for create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Note fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

impl From<NoteDraft> for NewNote {
    fn from(draft: NoteDraft) -> Self {
        Self {
            title: Some(draft.title),
            content: Some(draft.content),
            image_url: draft.image_url,
        }
    }
}

impl NewNote {
    /// Attaches the store-assigned id.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            image_url: self.image_url,
        }
    }
}

/// Sparse partial-update payload.
///
/// Outer `None`: key absent, leave the field alone.
/// `Some(None)`: key sent as `null`, clear the field.
/// `Some(Some(v))`: overwrite with `v`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

impl NotePatch {
    /// Returns true when the request carried none of the known keys.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image_url.is_none()
    }
}

// Only runs when the key exists, so `null` becomes `Some(None)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl Note {
    /// Applies full-update rules: title/content always, image only if non-null.
    pub fn apply_draft(&mut self, draft: NoteDraft) {
        self.title = Some(draft.title);
        self.content = Some(draft.content);
        if let Some(image_url) = draft.image_url {
            self.image_url = Some(image_url);
        }
    }

    /// Applies partial-update rules: every present key overwrites, null included.
    pub fn apply_patch(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
    }
}
