//! To-do repository contract and document-store implementation.
//!
//! # Invariants
//! - `add` and `edit` are full-document overwrites keyed by `item.id`.
//! - `list` never fails because of one malformed document; such documents
//!   are dropped and reported through `ListReport::malformed`.
//! - `toggle_status` flips `isDone` atomically in the store.

use crate::config::DEFAULT_COLLECTION;
use crate::model::todo_item::{ItemId, ToDoItem};
use crate::store::{DocumentStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DONE_FIELD: &str = "isDone";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    NotFound(ItemId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "to-do item not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Store(StoreError::Json(value))
    }
}

/// Result of a full collection read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReport {
    /// Items that deserialized cleanly, in store order.
    pub items: Vec<ToDoItem>,
    /// Document IDs skipped because their body is not a valid item.
    pub malformed: Vec<String>,
}

/// Repository interface for to-do item persistence.
pub trait TodoRepository {
    fn add(&self, item: &ToDoItem) -> RepoResult<()>;
    fn get(&self, id: &str) -> RepoResult<Option<ToDoItem>>;
    fn list(&self) -> RepoResult<Vec<ToDoItem>> {
        Ok(self.list_with_report()?.items)
    }
    fn list_with_report(&self) -> RepoResult<ListReport>;
    /// Negates `isDone` and returns the stored value after the flip.
    fn toggle_status(&self, id: &str) -> RepoResult<bool>;
    fn delete(&self, id: &str) -> RepoResult<()>;
    fn edit(&self, item: &ToDoItem) -> RepoResult<()>;
}

impl<R: TodoRepository + ?Sized> TodoRepository for &R {
    fn add(&self, item: &ToDoItem) -> RepoResult<()> {
        (**self).add(item)
    }

    fn get(&self, id: &str) -> RepoResult<Option<ToDoItem>> {
        (**self).get(id)
    }

    fn list_with_report(&self) -> RepoResult<ListReport> {
        (**self).list_with_report()
    }

    fn toggle_status(&self, id: &str) -> RepoResult<bool> {
        (**self).toggle_status(id)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        (**self).delete(id)
    }

    fn edit(&self, item: &ToDoItem) -> RepoResult<()> {
        (**self).edit(item)
    }
}

/// Repository storing items as documents of one collection.
pub struct DocumentTodoRepository<S: DocumentStore> {
    store: S,
    collection: String,
}

impl<S: DocumentStore> DocumentTodoRepository<S> {
    /// Uses the default `todos` collection.
    pub fn new(store: S) -> Self {
        Self::with_collection(store, DEFAULT_COLLECTION)
    }

    pub fn with_collection(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn upsert(&self, item: &ToDoItem) -> RepoResult<()> {
        let body = serde_json::to_value(item)?;
        self.store.set(&self.collection, &item.id, &body)?;
        Ok(())
    }
}

impl<S: DocumentStore> TodoRepository for DocumentTodoRepository<S> {
    fn add(&self, item: &ToDoItem) -> RepoResult<()> {
        self.upsert(item)?;
        info!("event=todo_add module=repo status=ok");
        Ok(())
    }

    fn get(&self, id: &str) -> RepoResult<Option<ToDoItem>> {
        match self.store.get(&self.collection, id)? {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }

    fn list_with_report(&self) -> RepoResult<ListReport> {
        let mut report = ListReport::default();

        for document in self.store.list(&self.collection)? {
            match serde_json::from_value::<ToDoItem>(document.body) {
                Ok(item) => report.items.push(item),
                Err(err) => {
                    warn!(
                        "event=todo_list_skip module=repo status=warn doc_id={} error={}",
                        document.id, err
                    );
                    report.malformed.push(document.id);
                }
            }
        }

        Ok(report)
    }

    fn toggle_status(&self, id: &str) -> RepoResult<bool> {
        let is_done = self
            .store
            .flip_bool(&self.collection, id, DONE_FIELD)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        info!("event=todo_toggle module=repo status=ok is_done={is_done}");
        Ok(is_done)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        self.store.delete(&self.collection, id)?;
        info!("event=todo_delete module=repo status=ok");
        Ok(())
    }

    fn edit(&self, item: &ToDoItem) -> RepoResult<()> {
        self.upsert(item)?;
        info!("event=todo_edit module=repo status=ok");
        Ok(())
    }
}
