//! Auth gate: credential checks plus `AuthState` transitions.
//!
//! # Invariants
//! - Empty email or password never reaches the provider.
//! - Every provider call is preceded by a `Loading` transition.
//! - Observers see every transition in order.

use crate::auth::{AuthProvider, AuthResult};
use crate::model::auth_state::{AuthSession, AuthState};
use log::{info, warn};

pub const EMPTY_CREDENTIALS_MESSAGE: &str = "Email or Password cannot be empty";
/// Used when the provider fails without a message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

type Observer = Box<dyn FnMut(&AuthState)>;

pub struct AuthGate<P: AuthProvider> {
    provider: P,
    state: AuthState,
    session: Option<AuthSession>,
    observers: Vec<Observer>,
}

impl<P: AuthProvider> AuthGate<P> {
    /// Creates the gate with state derived from the provider's session.
    pub fn new(provider: P) -> Self {
        let (state, session) = match provider.current_session() {
            Ok(Some(session)) => (AuthState::Authenticated, Some(session)),
            Ok(None) => (AuthState::Unauthenticated, None),
            Err(err) => {
                warn!(
                    "event=auth_status module=auth status=error error_code={}",
                    err.code()
                );
                (AuthState::Error(error_message(err.message())), None)
            }
        };

        Self {
            provider,
            state,
            session,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Registers a callback invoked after every state transition.
    pub fn subscribe(&mut self, observer: impl FnMut(&AuthState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn login(&mut self, email: &str, password: &str) -> &AuthState {
        self.authenticate("login", email, password, |provider, email, password| {
            provider.sign_in(email, password)
        })
    }

    pub fn signup(&mut self, email: &str, password: &str) -> &AuthState {
        self.authenticate("signup", email, password, |provider, email, password| {
            provider.create_user(email, password)
        })
    }

    pub fn sign_out(&mut self) -> &AuthState {
        match self.provider.sign_out() {
            Ok(()) => {
                self.session = None;
                self.transition(AuthState::Unauthenticated);
            }
            Err(err) => {
                warn!(
                    "event=auth_sign_out module=auth status=error error_code={}",
                    err.code()
                );
                self.transition(AuthState::Error(error_message(err.message())));
            }
        }
        &self.state
    }

    fn authenticate(
        &mut self,
        action: &'static str,
        email: &str,
        password: &str,
        call: impl FnOnce(&P, &str, &str) -> AuthResult<AuthSession>,
    ) -> &AuthState {
        if email.is_empty() || password.is_empty() {
            self.transition(AuthState::Error(EMPTY_CREDENTIALS_MESSAGE.to_string()));
            return &self.state;
        }

        self.transition(AuthState::Loading);
        match call(&self.provider, email, password) {
            Ok(session) => {
                info!("event=auth_{action} module=auth status=ok");
                self.session = Some(session);
                self.transition(AuthState::Authenticated);
            }
            Err(err) => {
                warn!(
                    "event=auth_{action} module=auth status=error error_code={}",
                    err.code()
                );
                self.transition(AuthState::Error(error_message(err.message())));
            }
        }
        &self.state
    }

    fn transition(&mut self, next: AuthState) {
        self.state = next;
        for observer in &mut self.observers {
            observer(&self.state);
        }
    }
}

fn error_message(message: Option<String>) -> String {
    message
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}
