//! Repository layer over the document collection.
//!
//! # Responsibility
//! - Translate to-do CRUD intents into `DocumentStore` calls.
//! - Keep JSON encoding details out of the service layer.
//!
//! # Invariants
//! - There is no local cache: every call reaches the store.

pub mod todo_repo;
