//! Opaque access tokens.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`AccessToken`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessTokenError {
    /// Wrong number of characters.
    #[error("access token must be {expected} characters, got {actual}")]
    Length {
        /// Required length.
        expected: usize,
        /// Length of the rejected input.
        actual: usize,
    },
    /// Contains a character outside `[A-Za-z0-9]`.
    #[error("access token must be ASCII alphanumeric")]
    Charset,
}

/// Characters a token may contain.
const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A 16-character alphanumeric token identifying a logged-in user.
///
/// Tokens carry no meaning of their own; they are looked up in the user
/// table. `Debug` output is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(String);

impl AccessToken {
    /// Number of characters in every token.
    pub const LENGTH: usize = 16;

    /// Parse and validate a token.
    ///
    /// # Errors
    ///
    /// Returns `AccessTokenError` if the input is not exactly
    /// [`Self::LENGTH`] ASCII alphanumeric characters.
    pub fn parse(s: &str) -> Result<Self, AccessTokenError> {
        if s.len() != Self::LENGTH {
            return Err(AccessTokenError::Length {
                expected: Self::LENGTH,
                actual: s.len(),
            });
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(AccessTokenError::Charset);
        }
        Ok(Self(s.to_owned()))
    }

    /// Build a token from [`Self::LENGTH`] alphabet picks.
    ///
    /// `pick` receives the alphabet size and returns an index; values are
    /// taken modulo the alphabet size, so any `pick` yields a valid token.
    /// Randomness is the caller's concern.
    #[must_use]
    pub fn generate(mut pick: impl FnMut(usize) -> usize) -> Self {
        let token = (0..Self::LENGTH)
            .filter_map(|_| ALPHABET.get(pick(ALPHABET.len()) % ALPHABET.len()))
            .map(|&b| char::from(b))
            .collect();
        Self(token)
    }

    /// The token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccessToken {
    type Error = AccessTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccessToken> for String {
    fn from(token: AccessToken) -> Self {
        token.0
    }
}
