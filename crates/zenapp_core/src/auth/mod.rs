//! Authentication provider contract and bundled SQLite implementation.
//!
//! # Responsibility
//! - Verify `(email, password)` pairs and track the signed-in session.
//! - Report failures with a human-readable message when one exists.
//!
//! # Invariants
//! - Passwords are stored only as Argon2id PHC strings (salt embedded).
//! - At most one session is current per provider instance.

pub mod provider;
mod sqlite_provider;

pub use provider::{AuthProvider, AuthProviderError, AuthResult};
pub use sqlite_provider::{SqliteAuthProvider, MIN_PASSWORD_CHARS};
