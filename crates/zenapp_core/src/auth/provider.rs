//! `AuthProvider` contract shared by all identity backends.

use crate::db::DbError;
use crate::model::auth_state::AuthSession;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AuthResult<T> = Result<T, AuthProviderError>;

/// Failure reported by an identity backend.
#[derive(Debug)]
pub enum AuthProviderError {
    InvalidEmail,
    WeakPassword { min_chars: usize },
    EmailInUse,
    InvalidCredentials,
    Storage(DbError),
    /// Password hashing or stored-hash parsing failed.
    Hashing(String),
    /// Backend failure carrying whatever message the backend supplied.
    Other(Option<String>),
}

impl AuthProviderError {
    /// Message suitable for display, if the backend supplied one.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::InvalidEmail => Some("The email address is badly formatted.".to_string()),
            Self::WeakPassword { min_chars } => Some(format!(
                "The given password is invalid. Password should be at least {min_chars} characters"
            )),
            Self::EmailInUse => {
                Some("The email address is already in use by another account.".to_string())
            }
            Self::InvalidCredentials => {
                Some("The supplied auth credential is incorrect.".to_string())
            }
            Self::Storage(err) => Some(format!("auth storage failure: {err}")),
            Self::Hashing(err) => Some(format!("password hashing failure: {err}")),
            Self::Other(message) => message.clone(),
        }
    }

    /// Stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::WeakPassword { .. } => "weak_password",
            Self::EmailInUse => "email_in_use",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Storage(_) => "storage",
            Self::Hashing(_) => "hashing",
            Self::Other(_) => "other",
        }
    }
}

impl Display for AuthProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "auth provider failure ({})", self.code()),
        }
    }
}

impl Error for AuthProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for AuthProviderError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for AuthProviderError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

/// Identity service consuming email/password pairs.
pub trait AuthProvider {
    /// Returns the persisted signed-in session, if any.
    fn current_session(&self) -> AuthResult<Option<AuthSession>>;
    fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession>;
    /// Registers a new account and signs it in.
    fn create_user(&self, email: &str, password: &str) -> AuthResult<AuthSession>;
    fn sign_out(&self) -> AuthResult<()>;
}

impl<P: AuthProvider + ?Sized> AuthProvider for &P {
    fn current_session(&self) -> AuthResult<Option<AuthSession>> {
        (**self).current_session()
    }

    fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        (**self).sign_in(email, password)
    }

    fn create_user(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        (**self).create_user(email, password)
    }

    fn sign_out(&self) -> AuthResult<()> {
        (**self).sign_out()
    }
}
