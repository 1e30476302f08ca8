//! Core domain logic for ZenApp.
//! This crate is the single source of truth for to-do and auth state rules.

pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use auth::{AuthProvider, AuthProviderError, AuthResult, SqliteAuthProvider};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::auth_state::{AuthSession, AuthState};
pub use model::todo_item::{new_item_id, ItemId, ToDoItem};
pub use repo::todo_repo::{
    DocumentTodoRepository, ListReport, RepoError, RepoResult, TodoRepository,
};
pub use service::auth_gate::{AuthGate, EMPTY_CREDENTIALS_MESSAGE, FALLBACK_ERROR_MESSAGE};
pub use service::todo_list::{TodoListError, TodoListStore};
pub use store::{DocumentStore, SqliteDocumentStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
