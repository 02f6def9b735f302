//! User domain types.
//!
//! These types represent validated domain objects separate from the raw
//! file records they are loaded from.

use std::fmt;

use serde::{Deserialize, Serialize};

use sunglasses_core::{AccessToken, Email, UserId};

use super::CartItem;

/// A user's display name, as found in the data files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    /// Honorific (`mr`, `mrs`, `ms`, ...).
    #[serde(default)]
    pub title: String,
    /// Given name.
    pub first: String,
    /// Family name.
    pub last: String,
}

/// A shopper (domain type).
///
/// Owns exactly one cart. Only the Argon2 hash of the password is kept.
#[derive(Clone)]
pub struct User {
    /// Position-derived user ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Login email.
    pub email: Email,
    /// Display name.
    pub name: PersonName,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Token used on cart requests.
    pub access_token: AccessToken,
    /// Cart lines in insertion order.
    pub cart: Vec<CartItem>,
}

impl User {
    /// Whether `identifier` is this user's username or email.
    #[must_use]
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        self.username == identifier || self.email.matches(identifier)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"[REDACTED]")
            .field("access_token", &self.access_token)
            .field("cart", &self.cart)
            .finish()
    }
}

/// The user a request acts for, resolved from its access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// User ID.
    pub id: UserId,
    /// Login name, for logs.
    pub username: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
