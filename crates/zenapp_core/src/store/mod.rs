//! Document collection client.
//!
//! # Responsibility
//! - Address JSON documents by `(collection, id)`.
//! - Hide the backing service behind the `DocumentStore` contract.
//!
//! # Invariants
//! - `set` is a full-document upsert; no field merging.
//! - `delete` of an absent document succeeds.
//! - `flip_bool` is atomic per document: concurrent flips never lose an update.

use crate::db::DbError;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite_store;

pub use sqlite_store::SqliteDocumentStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a document store backend.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Document body could not be encoded or decoded as JSON.
    Json(serde_json::Error),
    /// Backend rejected the call; message comes from the backend.
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid document json: {err}"),
            Self::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// One stored document: its key plus raw JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub body: Value,
}

/// Contract of a remote document collection service.
pub trait DocumentStore {
    /// Writes `body` under `id`, replacing any existing document.
    fn set(&self, collection: &str, id: &str, body: &Value) -> StoreResult<()>;
    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;
    /// Returns every document of `collection` in backend order.
    fn list(&self, collection: &str) -> StoreResult<Vec<StoredDocument>>;
    fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;
    /// Atomically negates boolean `field` (missing counts as `false`).
    ///
    /// Returns the new value, or `None` when the document does not exist.
    fn flip_bool(&self, collection: &str, id: &str, field: &str) -> StoreResult<Option<bool>>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn set(&self, collection: &str, id: &str, body: &Value) -> StoreResult<()> {
        (**self).set(collection, id, body)
    }

    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        (**self).get(collection, id)
    }

    fn list(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        (**self).list(collection)
    }

    fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        (**self).delete(collection, id)
    }

    fn flip_bool(&self, collection: &str, id: &str, field: &str) -> StoreResult<Option<bool>> {
        (**self).flip_bool(collection, id, field)
    }
}
