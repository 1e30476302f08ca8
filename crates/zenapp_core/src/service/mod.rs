//! Use-case services consumed by the presentation boundary.
//!
//! # Responsibility
//! - Hold UI-facing state (list snapshot, auth state).
//! - Orchestrate repository and provider calls per UI intent.

pub mod auth_gate;
pub mod todo_list;
