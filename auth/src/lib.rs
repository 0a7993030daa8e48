//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id)
//! - Namespaced JWT issuance and verification
//! - Authentication coordination
//!
//! Services define their own token payloads and namespaces and adapt these
//! implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{IssueOptions, JwtHandler, Namespace};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let session = Namespace::new("login", "users");
//! let options = IssueOptions::new(7, session.clone(), Duration::days(7));
//!
//! let token = handler.issue(&serde_json::json!({ "id": 7 }), &options).unwrap();
//! let claims = handler.verify(&token, &session).unwrap();
//! assert_eq!(claims.sub.as_deref(), Some("7"));
//!
//! // A token minted for one namespace never verifies under another
//! assert!(handler.verify(&token, &Namespace::new("forget", "users")).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IssueOptions;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::Namespace;
pub use password::PasswordError;
pub use password::PasswordHasher;
