use auth::Claims;
use auth::Namespace;
use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::user::models::User;

pub const SESSION_ISSUER: &str = "login";
pub const RESET_ISSUER: &str = "forget";
pub const AUDIENCE: &str = "users";

/// Namespace of tokens that authenticate requests.
pub fn session_namespace() -> Namespace {
    Namespace::new(SESSION_ISSUER, AUDIENCE)
}

/// Namespace of tokens that authorize a single password reset.
pub fn reset_namespace() -> Namespace {
    Namespace::new(RESET_ISSUER, AUDIENCE)
}

/// Fields embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for SessionPayload {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            name: user.name.to_string(),
            email: user.email.to_string(),
        }
    }
}

/// Fields embedded in a password reset token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPayload {
    pub id: i64,
}

/// Signed session token handed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub access_token: AccessToken,
}

/// Token lifetimes.
#[derive(Debug, Clone, Copy)]
pub struct TokenPolicy {
    pub session_ttl: Duration,
    pub reset_ttl: Duration,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            session_ttl: Duration::days(7),
            reset_ttl: Duration::minutes(30),
        }
    }
}

/// Identity established for one request by the guard.
#[derive(Debug, Clone)]
pub struct RequestIdentity {
    pub user: User,
    pub claims: Claims,
}
