use chrono::Duration;

/// Issuer/audience pair a token is minted for.
///
/// Tokens issued under one namespace never verify under another, which keeps
/// e.g. password-reset tokens from being accepted as session tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub issuer: String,
    pub audience: String,
}

impl Namespace {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }
}

/// Parameters for issuing a token.
#[derive(Debug, Clone)]
pub struct IssueOptions {
    /// Stored as the standard `sub` claim.
    pub subject: String,
    pub namespace: Namespace,
    /// Lifetime relative to the issue time.
    pub expires_in: Duration,
}

impl IssueOptions {
    pub fn new(subject: impl ToString, namespace: Namespace, expires_in: Duration) -> Self {
        Self {
            subject: subject.to_string(),
            namespace,
            expires_in,
        }
    }
}
