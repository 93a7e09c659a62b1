use std::future::Future;

use kerith_models::email_address::EmailAddress;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Deliver `email` through the configured transport.
    ///
    /// Performs exactly one outbound call and never retries.
    fn send(&self, email: Email) -> impl Future<Output = Result<(), EmailSendError>> + Send;

    /// Check that the configured transport is reachable without sending a
    /// message.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// The transport messages are delivered through, if any is configured.
    fn provider(&self) -> Option<EmailProvider>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddress,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
    /// Display name of the `From` header. The address itself is always the
    /// configured sender address.
    pub sender_name: Option<String>,
    pub reply_to: Option<EmailAddress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailProvider {
    Mailjet,
    Smtp,
}

impl EmailProvider {
    pub fn name(self) -> &'static str {
        match self {
            Self::Mailjet => "Mailjet",
            Self::Smtp => "SMTP",
        }
    }
}

impl std::fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name().fmt(f)
    }
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    #[error("Email delivery is not configured.")]
    NotConfigured,
    /// The provider refused the message.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: Result<(), EmailSendError>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_ping(mut self, result: anyhow::Result<()>) -> Self {
        self.expect_ping()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_provider(mut self, provider: Option<EmailProvider>) -> Self {
        self.expect_provider().return_const(provider);
        self
    }
}
