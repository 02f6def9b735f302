//! Raw file records.
//!
//! These mirror the on-disk JSON exactly (including fields the API never
//! reads) so that tools can rewrite a data set without losing anything.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sunglasses_core::{AccessToken, Email};

use crate::models::{CartItem, PersonName};

/// One entry of `users.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Display name.
    pub name: PersonName,
    /// Login email.
    pub email: Email,
    /// Credentials.
    pub login: LoginRecord,
    /// Pre-assigned token, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<AccessToken>,
    /// Cart lines.
    #[serde(default)]
    pub cart: Vec<CartItem>,
    /// Everything else (`gender`, `location`, `phone`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `login` object of a user record.
///
/// Either `password` (plaintext, hashed on load) or `passwordHash`
/// (an Argon2 PHC string) must be present.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRecord {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Argon2 PHC string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Legacy digest fields (`salt`, `md5`, `sha1`, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl std::fmt::Debug for LoginRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRecord")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}
