use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use super::template::TemplateRenderer;
use crate::config::MailConfig;
use crate::mail::errors::MailError;
use crate::mail::models::MailMessage;
use crate::mail::ports::Mailer;

/// Sends templated HTML mail over SMTP with STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    templates: TemplateRenderer,
}

impl SmtpMailer {
    /// Build the transport from config. No connection is made until the first send.
    ///
    /// # Errors
    /// * `InvalidAddress` - `from` is not a mailbox
    /// * `Transport` - Relay host cannot be used
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(format!("{}: {}", config.from, e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            templates: TemplateRenderer::new(&config.template_dir),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(format!("{}: {}", message.to, e)))?;

        let body = self
            .templates
            .render(&message.template, &message.context)
            .await?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::SendFailed(e.to_string()))?;

        tracing::info!(template = %message.template, "Mail sent");
        Ok(())
    }
}
