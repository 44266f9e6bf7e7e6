//! Account and session records.

use jabuticaba_core::{Email, UserId, UserRole};
use serde::{Deserialize, Serialize};

/// A registered account.
///
/// The password is stored as given; accounts here are a convenience for a
/// local single-user store, not a security boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password: String,
    pub role: UserRole,
}

/// Input for registering an account; the store assigns the id.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// The signed-in customer, persisted under the session key.
///
/// Carries no credential material; only what checkout and the order history
/// need to attribute orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: Email,
    pub role: UserRole,
}
