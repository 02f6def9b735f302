//! Authentication service.
//!
//! Logs users in with username-or-email and password, and maps access tokens
//! back to users. Tokens are pre-assigned per user and never expire.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};

use sunglasses_core::AccessToken;

use crate::models::User;
use crate::store::Store;

/// Authentication service.
///
/// Read-only: borrows the store for the duration of one lookup.
pub struct AuthService<'a> {
    store: &'a Store,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Verify credentials and return the matching user.
    ///
    /// `identifier` is compared against every user's username (exactly) and
    /// email (ignoring ASCII case).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either value is absent or
    /// empty, and `AuthError::InvalidCredentials` if no user matches the
    /// identifier or the password is wrong.
    pub fn authenticate(
        &self,
        identifier: Option<&str>,
        password: Option<&SecretString>,
    ) -> Result<&'a User, AuthError> {
        let (user, password) = self.find_user(identifier, password)?;
        verify_password(password, &user.password_hash)?;
        Ok(user)
    }

    /// Look up the user for a login without checking the password.
    ///
    /// The returned [`PendingLogin`] owns everything needed for the Argon2
    /// check, so callers can release the store lock before running it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::authenticate`], except a wrong password is only
    /// reported by [`PendingLogin::verify`].
    pub fn begin_login(
        &self,
        identifier: Option<&str>,
        password: Option<&SecretString>,
    ) -> Result<PendingLogin, AuthError> {
        let (user, password) = self.find_user(identifier, password)?;
        Ok(PendingLogin {
            username: user.username.clone(),
            access_token: user.access_token.clone(),
            password_hash: user.password_hash.clone(),
            password: password.clone(),
        })
    }

    fn find_user<'p>(
        &self,
        identifier: Option<&str>,
        password: Option<&'p SecretString>,
    ) -> Result<(&'a User, &'p SecretString), AuthError> {
        let identifier = identifier
            .filter(|id| !id.is_empty())
            .ok_or(AuthError::MissingCredentials)?;
        let password = password
            .filter(|pw| !pw.expose_secret().is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        let user = self
            .store
            .users()
            .iter()
            .find(|u| u.is_identified_by(identifier))
            .ok_or(AuthError::InvalidCredentials)?;

        Ok((user, password))
    }

    /// Log in and return the user's access token.
    ///
    /// # Errors
    ///
    /// See [`Self::authenticate`].
    pub fn login(
        &self,
        identifier: Option<&str>,
        password: Option<&SecretString>,
    ) -> Result<AccessToken, AuthError> {
        self.authenticate(identifier, password)
            .map(|user| user.access_token.clone())
    }

    /// Resolve an access token to its user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthenticated` if the token is absent, malformed,
    /// or belongs to nobody.
    pub fn resolve_token(&self, token: Option<&str>) -> Result<&'a User, AuthError> {
        let token = token
            .and_then(|raw| AccessToken::parse(raw).ok())
            .ok_or(AuthError::Unauthenticated)?;

        self.store
            .users()
            .iter()
            .find(|u| u.access_token == token)
            .ok_or(AuthError::Unauthenticated)
    }
}

/// A login whose user has been found but whose password is unchecked.
///
/// Detached from the store; [`Self::verify`] is CPU-bound.
pub struct PendingLogin {
    username: String,
    access_token: AccessToken,
    password_hash: String,
    password: SecretString,
}

impl PendingLogin {
    /// Username of the matched user.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check the password against the stored hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the password is wrong.
    pub fn verify(&self) -> Result<(), AuthError> {
        verify_password(&self.password, &self.password_hash)
    }

    /// The user's access token.
    #[must_use]
    pub fn into_token(self) -> AccessToken {
        self.access_token
    }
}

/// Generate a fresh random access token.
#[must_use]
pub fn issue_token() -> AccessToken {
    let mut rng = rand::rng();
    AccessToken::generate(|len| rng.random_range(0..len))
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &SecretString) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Check that a stored hash is a well-formed PHC string.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the string does not parse.
pub fn validate_password_hash(hash: &str) -> Result<(), AuthError> {
    PasswordHash::new(hash)
        .map(|_| ())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &SecretString, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
