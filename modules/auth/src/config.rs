//! Auth configuration: a signing secret and a static user table.

use serde::{Deserialize, Serialize};

/// One configured credential. Passwords are stored as lowercase hex
/// SHA-256 digests, never in the clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticUser {
    pub username: String,
    pub password_sha256: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "admin".to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When disabled, every request runs as the system identity. Meant for
    /// local development only.
    pub enabled: bool,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub users: Vec<StaticUser>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jwt_secret: String::new(),
            token_ttl_minutes: 60,
            users: Vec::new(),
        }
    }
}
