//! Caller identity and token claims.

use serde::{Deserialize, Serialize};

/// The authenticated caller, attached to every request as an extension.
/// Downstream modules trust this identity without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub subject: String,
    pub role: String,
}

impl AuthUser {
    /// Identity used when auth is disabled.
    pub fn system() -> Self {
        Self {
            subject: "system".to_owned(),
            role: "admin".to_owned(),
        }
    }
}

/// JWT claim set for issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly issued token plus its metadata, as returned by login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in_secs: i64,
    pub user: AuthUser,
}
