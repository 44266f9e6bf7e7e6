//! Account registration and sign-in.
//!
//! Accounts live in the state store next to the rest of the storefront
//! state. Credentials are compared in plain text; this layer exists to
//! attribute carts and orders, not to protect anything.

use std::sync::Arc;

use jabuticaba_core::{Email, EmailError, UserId, UserRole};

use crate::models::{Session, User, UserDraft};
use crate::store::{StateStore, get_json, keys, set_json};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccountError {
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("email or password is incorrect")]
    InvalidCredentials,
}

pub struct Accounts {
    store: Arc<dyn StateStore>,
}

impl Accounts {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    fn users(&self) -> Vec<User> {
        get_json(self.store.as_ref(), keys::USERS).unwrap_or_default()
    }

    /// Register a new account. The email is validated and normalized; a
    /// duplicate email is rejected.
    pub fn register(&self, draft: UserDraft) -> Result<User, AccountError> {
        let email = Email::parse(&draft.email)?;

        let mut users = self.users();
        if users.iter().any(|u| u.email == email) {
            return Err(AccountError::EmailTaken);
        }

        let id = UserId::new(users.iter().map(|u| u.id.as_i64()).max().unwrap_or(0) + 1);
        let user = User {
            id,
            name: draft.name.trim().to_owned(),
            email,
            password: draft.password,
            role: draft.role,
        };
        tracing::info!(id = %user.id, email = %user.email, "registering account");
        users.push(user.clone());
        set_json(self.store.as_ref(), keys::USERS, &users);
        Ok(user)
    }

    /// Sign in with an email and password, persisting the session.
    ///
    /// A malformed email is indistinguishable from a wrong one; both report
    /// [`AccountError::InvalidCredentials`]. Passwords are compared after
    /// trimming surrounding whitespace.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::InvalidCredentials)?;

        let users = self.users();
        let user = users
            .iter()
            .find(|u| u.email == email && u.password.trim() == password.trim())
            .ok_or(AccountError::InvalidCredentials)?;

        let session = Session {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        };
        set_json(self.store.as_ref(), keys::SESSION, &session);
        tracing::info!(email = %session.email, "signed in");
        Ok(session)
    }

    /// Drop the current session, if any.
    pub fn logout(&self) {
        self.store.remove(keys::SESSION);
    }

    /// The signed-in customer, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        get_json(self.store.as_ref(), keys::SESSION)
    }
}
