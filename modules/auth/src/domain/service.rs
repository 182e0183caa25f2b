//! Token issue and verification over the static credential table.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use super::error::AuthError;
use super::model::{AuthUser, Claims, IssuedToken};
use crate::config::AuthConfig;

pub struct AuthService {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    /// Build the service; fails fast on an enabled config without a secret.
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        if config.enabled && config.jwt_secret.is_empty() {
            return Err(AuthError::Misconfigured(
                "auth.jwt_secret must be set when auth is enabled".to_owned(),
            ));
        }
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Check the credentials against the static table and issue a token.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let digest = sha256_hex(password);
        let user = self
            .config
            .users
            .iter()
            .find(|u| u.username == username && u.password_sha256.eq_ignore_ascii_case(&digest))
            .ok_or_else(|| {
                warn!(username, "login rejected");
                AuthError::InvalidCredentials
            })?;

        let now = Utc::now();
        let ttl = Duration::minutes(self.config.token_ttl_minutes.max(1));
        let claims = Claims {
            sub: user.username.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Misconfigured(e.to_string()))?;

        info!(username, "login succeeded");
        Ok(IssuedToken {
            token,
            expires_in_secs: ttl.num_seconds(),
            user: AuthUser {
                subject: user.username.clone(),
                role: user.role.clone(),
            },
        })
    }

    /// Validate a bearer token and extract the caller identity.
    pub fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthUser {
            subject: data.claims.sub,
            role: data.claims.role,
        })
    }
}

fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::config::StaticUser;

    fn config() -> AuthConfig {
        AuthConfig {
            enabled: true,
            jwt_secret: "test-secret".to_owned(),
            token_ttl_minutes: 30,
            users: vec![StaticUser {
                username: "ops".to_owned(),
                // sha256("hunter2")
                password_sha256: sha256_hex("hunter2"),
                role: "admin".to_owned(),
            }],
        }
    }

    #[test]
    fn login_then_verify_round_trips() {
        let svc = AuthService::new(config()).expect("service");
        let issued = svc.login("ops", "hunter2").expect("login");
        assert_eq!(issued.user.subject, "ops");
        assert!(issued.expires_in_secs > 0);

        let user = svc.verify(&issued.token).expect("verify");
        assert_eq!(user.subject, "ops");
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn wrong_password_and_unknown_user_are_indistinguishable() {
        let svc = AuthService::new(config()).expect("service");
        let a = svc.login("ops", "wrong").expect_err("bad password");
        let b = svc.login("ghost", "hunter2").expect_err("unknown user");
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let svc = AuthService::new(config()).expect("service");
        let issued = svc.login("ops", "hunter2").expect("login");
        let mut tampered = issued.token;
        tampered.push('x');
        assert!(svc.verify(&tampered).is_err());
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let svc = AuthService::new(config()).expect("service");
        let mut other_cfg = config();
        other_cfg.jwt_secret = "different".to_owned();
        let other = AuthService::new(other_cfg).expect("service");
        let issued = other.login("ops", "hunter2").expect("login");
        assert!(svc.verify(&issued.token).is_err());
    }

    #[test]
    fn enabled_auth_requires_a_secret() {
        let mut cfg = config();
        cfg.jwt_secret = String::new();
        assert!(AuthService::new(cfg).is_err());
    }
}
