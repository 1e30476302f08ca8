//! Domain model for the to-do list and authentication state.
//!
//! # Invariants
//! - Every item is identified by a caller-generated `ItemId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod auth_state;
pub mod todo_item;
