//! SQLite-backed email/password provider.

use super::provider::{AuthProvider, AuthProviderError, AuthResult};
use crate::db::ensure_table;
use crate::model::auth_state::AuthSession;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub struct SqliteAuthProvider<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthProvider<'conn> {
    /// Binds the provider to a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> AuthResult<Self> {
        ensure_table(conn, "auth_users")?;
        ensure_table(conn, "auth_current_session")?;
        Ok(Self { conn })
    }

    fn start_session(&self, uid: &str) -> AuthResult<()> {
        self.conn.execute(
            "INSERT INTO auth_current_session (slot, uid) VALUES (1, ?1)
             ON CONFLICT (slot) DO UPDATE SET
                uid = excluded.uid,
                signed_in_at = (strftime('%s', 'now') * 1000);",
            [uid],
        )?;
        Ok(())
    }
}

impl AuthProvider for SqliteAuthProvider<'_> {
    fn current_session(&self) -> AuthResult<Option<AuthSession>> {
        let session = self
            .conn
            .query_row(
                "SELECT u.uid, u.email
                 FROM auth_current_session s
                 JOIN auth_users u ON u.uid = s.uid
                 WHERE s.slot = 1;",
                [],
                |row| {
                    Ok(AuthSession {
                        uid: row.get(0)?,
                        email: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(session)
    }

    fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let email = email.trim();
        let account: Option<(String, String, String)> = self
            .conn
            .query_row(
                "SELECT uid, email, password_hash
                 FROM auth_users
                 WHERE email = ?1;",
                [email],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((uid, stored_email, stored_hash)) = account else {
            return Err(AuthProviderError::InvalidCredentials);
        };
        verify_password(password, &stored_hash)?;

        self.start_session(&uid)?;
        info!("event=auth_sign_in module=auth status=ok");
        Ok(AuthSession {
            uid,
            email: stored_email,
        })
    }

    fn create_user(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let email = email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(AuthProviderError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthProviderError::WeakPassword {
                min_chars: MIN_PASSWORD_CHARS,
            });
        }

        let taken: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM auth_users WHERE email = ?1);",
            [email],
            |row| row.get(0),
        )?;
        if taken {
            return Err(AuthProviderError::EmailInUse);
        }

        let uid = Uuid::new_v4().to_string();
        let password_hash = hash_password(password)?;
        self.conn.execute(
            "INSERT INTO auth_users (uid, email, password_hash)
             VALUES (?1, ?2, ?3);",
            params![uid, email, password_hash],
        )?;

        self.start_session(&uid)?;
        info!("event=auth_create_user module=auth status=ok");
        Ok(AuthSession {
            uid,
            email: email.to_string(),
        })
    }

    fn sign_out(&self) -> AuthResult<()> {
        self.conn
            .execute("DELETE FROM auth_current_session WHERE slot = 1;", [])?;
        info!("event=auth_sign_out module=auth status=ok");
        Ok(())
    }
}

/// Hashes `password` into an Argon2id PHC string with a fresh random salt.
fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthProviderError::Hashing(err.to_string()))
}

/// Checks `password` against a stored PHC string.
fn verify_password(password: &str, stored_hash: &str) -> AuthResult<()> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| AuthProviderError::Hashing(format!("stored password hash: {err}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(argon2::password_hash::Error::Password) => Err(AuthProviderError::InvalidCredentials),
        Err(err) => Err(AuthProviderError::Hashing(err.to_string())),
    }
}
