//! Flutter-facing bindings for ZenApp core.

pub mod api;
