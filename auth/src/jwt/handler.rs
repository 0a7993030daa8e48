use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;
use super::options::IssueOptions;
use super::options::Namespace;

/// JWT token handler for issuing and verifying namespaced tokens.
///
/// Uses HS256 (HMAC with SHA-256). Verification is all-or-nothing: signature,
/// expiry, issuer and audience must all match or the token is rejected.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in configuration or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token carrying `payload`, using the system clock.
    ///
    /// # Errors
    /// * `EncodingFailed` - Payload is not a JSON object or signing failed
    pub fn issue<T: Serialize>(
        &self,
        payload: &T,
        options: &IssueOptions,
    ) -> Result<String, JwtError> {
        self.issue_at(payload, options, Utc::now().timestamp())
    }

    /// Issue a signed token as if the current time were `now` (Unix seconds).
    ///
    /// Payload fields are embedded verbatim; `sub`, `iss`, `aud`, `iat` and
    /// `exp` come from `options`.
    pub fn issue_at<T: Serialize>(
        &self,
        payload: &T,
        options: &IssueOptions,
        now: i64,
    ) -> Result<String, JwtError> {
        let claims = Claims::from_payload(payload)?
            .with_subject(&options.subject)
            .with_issuer(options.namespace.issuer.clone())
            .with_audience(options.namespace.audience.clone())
            .with_issued_at(now)
            .with_expiration(now + options.expires_in.num_seconds());

        self.encode(&claims)
    }

    /// Encode claims into a JWT token as-is.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against `namespace`, using the system clock.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with another secret or tampered with
    /// * `TokenExpired` - Expiry has passed
    /// * `InvalidIssuer` / `InvalidAudience` - Minted for another namespace
    /// * `MissingClaim` - `exp`, `sub`, `iss` or `aud` absent
    /// * `InvalidToken` - Malformed token
    pub fn verify(&self, token: &str, namespace: &Namespace) -> Result<Claims, JwtError> {
        self.verify_at(token, namespace, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (Unix seconds).
    pub fn verify_at(
        &self,
        token: &str,
        namespace: &Namespace,
        now: i64,
    ) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.set_issuer(&[&namespace.issuer]);
        validation.set_audience(&[&namespace.audience]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;

        if claims.exp.is_none() {
            return Err(JwtError::MissingClaim("exp".to_string()));
        }
        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
