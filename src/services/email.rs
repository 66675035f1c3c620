use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};

use super::UpstreamError;
use crate::configuration::EmailSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    /// Falls back to the sender's configured address.
    pub from: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
    pub attachments: Vec<EmailAttachment>,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), UpstreamError>;
}

pub struct SmtpEmailSender {
    mailer: SmtpTransport,
    default_from: String,
}

impl SmtpEmailSender {
    pub fn new(settings: &EmailSettings) -> Result<Self, UpstreamError> {
        let credentials = Credentials::new(settings.username.clone(), settings.password.clone());
        let mailer = SmtpTransport::relay(&settings.smtp_relay)
            .map_err(email_error)?
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(settings.timeout_secs)))
            .build();
        Ok(Self {
            mailer,
            default_from: settings.sender.clone(),
        })
    }
}

fn email_error(err: impl std::fmt::Display) -> UpstreamError {
    UpstreamError::new("email", err.to_string())
}

fn build_message(email: OutgoingEmail, default_from: &str) -> Result<Message, UpstreamError> {
    let from = email.from.as_deref().unwrap_or(default_from);
    let mut body = MultiPart::mixed().multipart(MultiPart::alternative_plain_html(
        email.text,
        email.html,
    ));
    for attachment in email.attachments {
        let content_type =
            ContentType::parse(&attachment.content_type).map_err(email_error)?;
        body = body.singlepart(
            Attachment::new(attachment.filename).body(attachment.content, content_type),
        );
    }

    Message::builder()
        .from(from.parse::<Mailbox>().map_err(email_error)?)
        .to(email.to.parse::<Mailbox>().map_err(email_error)?)
        .subject(email.subject)
        .multipart(body)
        .map_err(email_error)
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: OutgoingEmail) -> Result<(), UpstreamError> {
        let recipient = email.to.clone();
        let message = build_message(email, &self.default_from)?;
        let mailer = self.mailer.clone();

        // the SMTP transport is blocking
        let sent = tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(email_error)?;

        match sent {
            Ok(_) => {
                tracing::info!("Email sent to {} successfully!", recipient);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to send email {:#?}", err);
                Err(UpstreamError::new("email", err.to_string()))
            }
        }
    }
}
