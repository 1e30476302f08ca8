//! To-do item record.
//!
//! # Invariants
//! - `id` is generated client-side and never reused for another item.
//! - The serialized shape is `{id, title, description, isDone}`; missing
//!   fields fall back to defaults, mistyped fields fail deserialization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document key of an item inside its collection.
pub type ItemId = String;

/// Generates a fresh random item ID (UUID v4, hyphenated).
pub fn new_item_id() -> ItemId {
    Uuid::new_v4().to_string()
}

/// One to-do record as stored in the document collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToDoItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    #[serde(rename = "isDone")]
    pub is_done: bool,
}

impl ToDoItem {
    /// Creates a pending item with a generated ID.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(new_item_id(), title, description)
    }

    /// Creates a pending item under a caller-provided ID.
    pub fn with_id(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            is_done: false,
        }
    }
}
