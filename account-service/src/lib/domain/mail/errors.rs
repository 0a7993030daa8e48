use thiserror::Error;

/// Error for mail rendering and delivery failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("Failed to send mail: {0}")]
    SendFailed(String),
}
