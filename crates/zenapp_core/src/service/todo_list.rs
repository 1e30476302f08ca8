//! List state store for the to-do screen.
//!
//! # Invariants
//! - `add` and `edit` refresh the snapshot with a full reload.
//! - `toggle` and `delete` patch the snapshot in place without reloading.
//! - A failed repository call leaves the snapshot unchanged.
//! - When a write lands but the reload after it fails, the error still
//!   carries the written item ID (`ReloadAfterWrite`).

use crate::model::todo_item::{ItemId, ToDoItem};
use crate::repo::todo_repo::{RepoError, TodoRepository};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum TodoListError {
    /// A required input field is empty; carries the field name.
    EmptyField(&'static str),
    Repo(RepoError),
    /// The item was written, but refreshing the snapshot failed.
    ReloadAfterWrite { item_id: ItemId, source: RepoError },
}

impl TodoListError {
    /// ID of an item that was persisted despite the error, if any.
    pub fn written_item_id(&self) -> Option<&str> {
        match self {
            Self::ReloadAfterWrite { item_id, .. } => Some(item_id.as_str()),
            Self::EmptyField(_) | Self::Repo(_) => None,
        }
    }
}

impl Display for TodoListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::ReloadAfterWrite { item_id, source } => {
                write!(f, "item {item_id} saved but list reload failed: {source}")
            }
        }
    }
}

impl Error for TodoListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) | Self::ReloadAfterWrite { source: err, .. } => Some(err),
            Self::EmptyField(_) => None,
        }
    }
}

impl From<RepoError> for TodoListError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// In-memory snapshot of the item list plus the repository that feeds it.
pub struct TodoListStore<R: TodoRepository> {
    repo: R,
    snapshot: Vec<ToDoItem>,
}

impl<R: TodoRepository> TodoListStore<R> {
    /// Creates a store with an empty snapshot; call `reload` to populate it.
    pub fn new(repo: R) -> Self {
        Self::with_snapshot(repo, Vec::new())
    }

    /// Creates a store resuming from a previously held snapshot.
    pub fn with_snapshot(repo: R, snapshot: Vec<ToDoItem>) -> Self {
        Self { repo, snapshot }
    }

    pub fn items(&self) -> &[ToDoItem] {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> Vec<ToDoItem> {
        self.snapshot
    }

    /// Replaces the snapshot with the full collection.
    pub fn reload(&mut self) -> Result<&[ToDoItem], TodoListError> {
        self.snapshot = self.repo.list()?;
        debug!(
            "event=todo_reload module=service status=ok count={}",
            self.snapshot.len()
        );
        Ok(&self.snapshot)
    }

    /// Persists a new pending item and reloads; returns its generated ID.
    pub fn add(&mut self, title: &str, description: &str) -> Result<ItemId, TodoListError> {
        require_fields(title, description)?;
        let item = ToDoItem::new(title, description);
        self.repo.add(&item)?;
        self.reload_after_write(item.id)
    }

    /// Overwrites title and description of `id` and reloads.
    ///
    /// The done flag is read from the collection, not the snapshot; unknown
    /// IDs are written as pending items.
    pub fn edit(&mut self, id: &str, title: &str, description: &str) -> Result<(), TodoListError> {
        require_fields(title, description)?;
        let mut item = ToDoItem::with_id(id, title, description);
        item.is_done = self
            .repo
            .get(id)?
            .is_some_and(|existing| existing.is_done);
        self.repo.edit(&item)?;
        self.reload_after_write(item.id).map(|_| ())
    }

    /// Flips the done flag of `id` and patches the snapshot entry.
    pub fn toggle(&mut self, id: &str) -> Result<bool, TodoListError> {
        let is_done = self.repo.toggle_status(id)?;
        if let Some(item) = self.snapshot.iter_mut().find(|item| item.id == id) {
            item.is_done = is_done;
        }
        Ok(is_done)
    }

    /// Removes `id` remotely and from the snapshot.
    pub fn delete(&mut self, id: &str) -> Result<(), TodoListError> {
        self.repo.delete(id)?;
        self.snapshot.retain(|item| item.id != id);
        Ok(())
    }

    fn reload_after_write(&mut self, item_id: ItemId) -> Result<ItemId, TodoListError> {
        match self.repo.list() {
            Ok(items) => {
                self.snapshot = items;
                Ok(item_id)
            }
            Err(source) => Err(TodoListError::ReloadAfterWrite { item_id, source }),
        }
    }
}

fn require_fields(title: &str, description: &str) -> Result<(), TodoListError> {
    if title.is_empty() {
        return Err(TodoListError::EmptyField("title"));
    }
    if description.is_empty() {
        return Err(TodoListError::EmptyField("description"));
    }
    Ok(())
}
