use anyhow::{anyhow, Context};
use kerith_email_contracts::{ContentType, Email, EmailSendError};
use kerith_models::validate::single_line;
use kerith_utils::Apply;
use lettre::{
    message::{header, Mailbox, MessageBuilder},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{EmailSender, SMTP_IMPLICIT_TLS_PORT};

#[derive(Debug, Clone)]
pub(crate) struct SmtpTransport(AsyncSmtpTransport<Tokio1Executor>);

impl SmtpTransport {
    pub(crate) fn new(host: &str, port: u16, user: String, password: String) -> anyhow::Result<Self> {
        let builder = if port == SMTP_IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .with_context(|| format!("Failed to configure smtp relay {host}"))?;

        let transport = builder
            .port(port)
            .credentials(Credentials::new(user, password))
            .build();

        Ok(Self(transport))
    }

    pub(crate) async fn send(
        &self,
        sender: &EmailSender,
        email: Email,
    ) -> Result<(), EmailSendError> {
        let message = build_message(sender, email)?;

        match self.0.send(message).await {
            Ok(response) if response.is_positive() => Ok(()),
            Ok(response) => Err(EmailSendError::Rejected(format!(
                "SMTP server rejected the message ({}): {}",
                response.code(),
                response
                    .message()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            ))),
            Err(err) if err.is_permanent() || err.is_transient() => Err(
                EmailSendError::Rejected(format!("SMTP server rejected the message: {err}")),
            ),
            Err(err) => Err(anyhow::Error::new(err)
                .context("Failed to deliver message via smtp")
                .into()),
        }
    }

    pub(crate) async fn ping(&self) -> anyhow::Result<()> {
        self.0
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn build_message(sender: &EmailSender, email: Email) -> anyhow::Result<Message> {
    // lettre cannot fold a display name containing line breaks
    let sender_name = email
        .sender_name
        .or_else(|| sender.name.clone())
        .map(|name| single_line(&name))
        .filter(|name| !name.is_empty());
    let from = Mailbox::new(sender_name, parse_address(sender.address.as_str())?);

    Message::builder()
        .from(from)
        .to(Mailbox::new(None, parse_address(email.recipient.as_str())?))
        .apply_map(
            email
                .reply_to
                .map(|reply_to| parse_address(reply_to.as_str()))
                .transpose()?
                .map(|address| Mailbox::new(None, address)),
            MessageBuilder::reply_to,
        )
        .subject(email.subject)
        .header(match email.content_type {
            ContentType::Text => header::ContentType::TEXT_PLAIN,
            ContentType::Html => header::ContentType::TEXT_HTML,
        })
        .body(email.body)
        .context("Failed to build message")
}

fn parse_address(address: &str) -> anyhow::Result<Address> {
    address
        .parse()
        .with_context(|| format!("Invalid email address {address}"))
}
