//! Auth domain errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown user or wrong password. Deliberately does not say which.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Missing, malformed, expired or tampered bearer token.
    #[error("invalid or expired token")]
    InvalidToken,

    /// The auth section is on but unusable (e.g. empty secret).
    #[error("auth misconfigured: {0}")]
    Misconfigured(String),
}
