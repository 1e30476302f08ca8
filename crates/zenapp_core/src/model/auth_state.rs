//! Authentication state exposed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Closed set of auth states a UI renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum AuthState {
    Authenticated,
    Unauthenticated,
    /// A provider call is in flight.
    Loading,
    /// Validation or provider failure, with a human-readable message.
    Error(String),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// Short stable label (`authenticated|unauthenticated|loading|error`).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Authenticated => "authenticated",
            Self::Unauthenticated => "unauthenticated",
            Self::Loading => "loading",
            Self::Error(_) => "error",
        }
    }
}

/// Signed-in account returned by a successful provider call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub uid: String,
    pub email: String,
}
