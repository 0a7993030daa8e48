use async_trait::async_trait;

use crate::mail::errors::MailError;
use crate::mail::models::MailMessage;

/// Outbound email delivery.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Render and deliver `message`.
    ///
    /// # Errors
    /// * `InvalidAddress` - Recipient or sender cannot be parsed
    /// * `Template` - Template missing or a placeholder has no value
    /// * `SendFailed` - Transport rejected the message
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}
