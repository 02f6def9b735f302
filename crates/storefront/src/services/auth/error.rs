//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Identifier or password was empty or absent.
    #[error("username/email and password are required")]
    MissingCredentials,

    /// No user matches the identifier/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Access token absent or unrecognized.
    #[error("a valid access token is required")]
    Unauthenticated,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
