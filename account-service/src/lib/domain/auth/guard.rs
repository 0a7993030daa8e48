use std::fmt;
use std::sync::Arc;

use crate::auth::models::RequestIdentity;
use crate::auth::ports::AuthServicePort;
use crate::user::errors::UserError;
use crate::user::models::UserId;
use crate::user::ports::UserServicePort;

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    MissingToken,
    InvalidToken(String),
    InvalidSubject(String),
    UnknownUser(UserId),
    LookupFailed(String),
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::MissingToken => write!(f, "missing bearer token"),
            DenialReason::InvalidToken(e) => write!(f, "invalid token: {}", e),
            DenialReason::InvalidSubject(sub) => write!(f, "invalid subject: {}", sub),
            DenialReason::UnknownUser(id) => write!(f, "unknown user {}", id),
            DenialReason::LookupFailed(e) => write!(f, "user lookup failed: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denied {
    pub reason: DenialReason,
}

impl From<DenialReason> for Denied {
    fn from(reason: DenialReason) -> Self {
        Self { reason }
    }
}

/// Token part of an `Authorization: Bearer <token>` header.
///
/// Anything else yields an empty token, which never verifies.
pub fn bearer_token(header: Option<&str>) -> &str {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or("")
}

/// Gate for routes that need a signed-in user.
///
/// A request passes only when its bearer token verifies as a session token
/// and its subject names an existing user.
#[derive(Clone)]
pub struct AuthGuard {
    auth: Arc<dyn AuthServicePort>,
    users: Arc<dyn UserServicePort>,
}

impl AuthGuard {
    pub fn new(auth: Arc<dyn AuthServicePort>, users: Arc<dyn UserServicePort>) -> Self {
        Self { auth, users }
    }

    /// Resolve the identity behind an `Authorization` header value.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<RequestIdentity, Denied> {
        let token = bearer_token(header);
        if token.is_empty() {
            return Err(DenialReason::MissingToken.into());
        }

        let claims = self
            .auth
            .check_token(token)
            .map_err(|e| DenialReason::InvalidToken(e.to_string()))?;

        let subject = claims.sub.clone().unwrap_or_default();
        let id = UserId::from_string(&subject)
            .map_err(|_| DenialReason::InvalidSubject(subject.clone()))?;

        let user = self.users.get_user(&id).await.map_err(|e| match e {
            UserError::NotFound(_) => DenialReason::UnknownUser(id),
            other => DenialReason::LookupFailed(other.to_string()),
        })?;

        Ok(RequestIdentity { user, claims })
    }

    /// Boolean form of [`AuthGuard::authenticate`].
    pub async fn can_activate(&self, header: Option<&str>) -> bool {
        self.authenticate(header).await.is_ok()
    }
}
