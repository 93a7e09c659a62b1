use kerith_email_contracts::{Email, EmailProvider, EmailSendError, EmailService};
use kerith_models::email_address::EmailAddress;
use url::Url;

use crate::{mailjet::MailjetTransport, smtp::SmtpTransport};

mod mailjet;
mod smtp;

pub use mailjet::MAILJET_API_URL;

/// SMTP port on which the connection is wrapped in TLS right away. All other
/// ports upgrade the connection using STARTTLS.
pub const SMTP_IMPLICIT_TLS_PORT: u16 = 465;
pub const SMTP_DEFAULT_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    sender: Option<EmailSender>,
    transport: Option<Transport>,
}

/// The `From` mailbox of all outgoing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSender {
    pub address: EmailAddress,
    /// Used when a message does not carry its own sender name.
    pub name: Option<String>,
}

/// Everything needed to connect to a mail transport.
#[derive(Clone, PartialEq, Eq)]
pub enum EmailTransportSettings {
    Mailjet {
        api_key: String,
        secret_key: String,
        endpoint: Url,
    },
    Smtp {
        host: String,
        port: u16,
        user: String,
        password: String,
    },
}

impl std::fmt::Debug for EmailTransportSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mailjet { endpoint, .. } => f
                .debug_struct("Mailjet")
                .field("endpoint", &endpoint.as_str())
                .finish_non_exhaustive(),
            Self::Smtp {
                host, port, user, ..
            } => f
                .debug_struct("Smtp")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .finish_non_exhaustive(),
        }
    }
}

impl EmailTransportSettings {
    pub fn provider(&self) -> EmailProvider {
        match self {
            Self::Mailjet { .. } => EmailProvider::Mailjet,
            Self::Smtp { .. } => EmailProvider::Smtp,
        }
    }
}

#[derive(Debug, Clone)]
enum Transport {
    Mailjet(MailjetTransport),
    Smtp(SmtpTransport),
}

impl EmailServiceImpl {
    pub fn new(
        settings: Option<EmailTransportSettings>,
        sender: Option<EmailSender>,
    ) -> anyhow::Result<Self> {
        let transport = settings
            .map(|settings| {
                anyhow::Ok(match settings {
                    EmailTransportSettings::Mailjet {
                        api_key,
                        secret_key,
                        endpoint,
                    } => Transport::Mailjet(MailjetTransport::new(api_key, secret_key, endpoint)?),
                    EmailTransportSettings::Smtp {
                        host,
                        port,
                        user,
                        password,
                    } => Transport::Smtp(SmtpTransport::new(&host, port, user, password)?),
                })
            })
            .transpose()?;

        Ok(Self { sender, transport })
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let (Some(transport), Some(sender)) = (&self.transport, &self.sender) else {
            return Err(EmailSendError::NotConfigured);
        };

        match transport {
            Transport::Mailjet(transport) => transport.send(sender, email).await,
            Transport::Smtp(transport) => transport.send(sender, email).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match &self.transport {
            Some(Transport::Mailjet(transport)) => transport.ping().await,
            Some(Transport::Smtp(transport)) => transport.ping().await,
            None => Err(EmailSendError::NotConfigured.into()),
        }
    }

    fn provider(&self) -> Option<EmailProvider> {
        self.transport.as_ref().map(|transport| match transport {
            Transport::Mailjet(_) => EmailProvider::Mailjet,
            Transport::Smtp(_) => EmailProvider::Smtp,
        })
    }
}

#[cfg(test)]
mod tests {
    use kerith_email_contracts::ContentType;
    use kerith_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn email() -> Email {
        Email {
            recipient: "team@example.com".parse().unwrap(),
            subject: "Subject".into(),
            body: "Body".into(),
            content_type: ContentType::Text,
            sender_name: None,
            reply_to: None,
        }
    }

    fn sender() -> EmailSender {
        EmailSender {
            address: "noreply@example.com".parse().unwrap(),
            name: Some("Kerith & Co. Events".into()),
        }
    }

    #[tokio::test]
    async fn send_without_transport() {
        // Arrange
        let sut = EmailServiceImpl::new(None, Some(sender())).unwrap();

        // Act
        let result = sut.send(email()).await;

        // Assert
        assert_matches!(result, Err(EmailSendError::NotConfigured));
        assert_eq!(sut.provider(), None);
    }

    #[tokio::test]
    async fn send_without_sender() {
        // Arrange
        let settings = EmailTransportSettings::Smtp {
            host: "localhost".into(),
            port: SMTP_DEFAULT_PORT,
            user: "user".into(),
            password: "password".into(),
        };
        let sut = EmailServiceImpl::new(Some(settings), None).unwrap();

        // Act
        let result = sut.send(email()).await;

        // Assert
        assert_matches!(result, Err(EmailSendError::NotConfigured));
        assert_eq!(sut.provider(), Some(EmailProvider::Smtp));
    }

    #[test]
    fn settings_debug_hides_credentials() {
        let settings = EmailTransportSettings::Mailjet {
            api_key: "public-key".into(),
            secret_key: "private-key".into(),
            endpoint: MAILJET_API_URL.parse().unwrap(),
        };

        let debug = format!("{settings:?}");

        assert!(!debug.contains("public-key"));
        assert!(!debug.contains("private-key"));
        assert_eq!(settings.provider(), EmailProvider::Mailjet);
    }
}
