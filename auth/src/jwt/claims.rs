use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Registered claim names. Payload fields with these names are dropped so
/// they cannot shadow the values set by the codec.
pub const RESERVED_CLAIMS: [&str; 7] = ["sub", "exp", "iat", "nbf", "iss", "aud", "jti"];

/// Generic JWT claims structure.
///
/// Standard RFC 7519 claims plus the issuer-supplied payload, which is
/// flattened into the token next to them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Payload fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build claims whose payload is the JSON object form of `payload`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Payload does not serialize to a JSON object
    pub fn from_payload<T: Serialize>(payload: &T) -> Result<Self, JwtError> {
        let value =
            serde_json::to_value(payload).map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        let serde_json::Value::Object(fields) = value else {
            return Err(JwtError::EncodingFailed(
                "token payload must be a JSON object".to_string(),
            ));
        };

        let extra = fields
            .into_iter()
            .filter(|(key, _)| !RESERVED_CLAIMS.contains(&key.as_str()))
            .collect();

        Ok(Self {
            extra,
            ..Self::default()
        })
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: String) -> Self {
        self.iss = Some(iss);
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: String) -> Self {
        self.aud = Some(aud);
        self
    }

    /// Deserialize the payload fields into a typed value.
    ///
    /// # Errors
    /// * `DecodingFailed` - Payload does not match `T`
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, JwtError> {
        let fields = self
            .extra
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }
}
