use std::sync::{Arc, LazyLock};

use anyhow::Context;
use kerith_email_contracts::{ContentType, Email, EmailSendError};
use kerith_utils::kerith_version;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::EmailSender;

pub const MAILJET_API_URL: &str = "https://api.mailjet.com/";

static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let version = kerith_version();

    format!("Kerith Backend ({homepage}, Version {version})")
});

#[derive(Debug, Clone)]
pub(crate) struct MailjetTransport {
    client: reqwest::Client,
    send_endpoint: Arc<Url>,
    user_endpoint: Arc<Url>,
    credentials: Arc<Credentials>,
}

struct Credentials {
    api_key: String,
    secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[redacted]")
    }
}

impl MailjetTransport {
    pub(crate) fn new(api_key: String, secret_key: String, endpoint: Url) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()
            .context("Failed to build http client")?;

        Ok(Self {
            client,
            send_endpoint: endpoint.join("v3.1/send")?.into(),
            user_endpoint: endpoint.join("v3/REST/user")?.into(),
            credentials: Credentials {
                api_key,
                secret_key,
            }
            .into(),
        })
    }

    pub(crate) async fn send(
        &self,
        sender: &EmailSender,
        email: Email,
    ) -> Result<(), EmailSendError> {
        let sender_name = email.sender_name.as_deref().or(sender.name.as_deref());
        let (html_part, text_part) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendRequest {
            messages: [Message {
                from: Contact {
                    email: sender.address.as_str(),
                    name: sender_name,
                },
                to: [Contact {
                    email: email.recipient.as_str(),
                    name: None,
                }],
                reply_to: email.reply_to.as_ref().map(|reply_to| Contact {
                    email: reply_to.as_str(),
                    name: None,
                }),
                subject: &email.subject,
                html_part,
                text_part,
            }],
        };

        let response = self
            .client
            .post((*self.send_endpoint).clone())
            .basic_auth(
                &self.credentials.api_key,
                Some(&self.credentials.secret_key),
            )
            .json(&request)
            .send()
            .await
            .context("Failed to reach the Mailjet API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read the Mailjet API response")?;

        if !status.is_success() {
            return Err(EmailSendError::Rejected(rejection_detail(status, &body)));
        }

        let response = serde_json::from_str::<SendResponse>(&body)
            .context("Failed to parse the Mailjet API response")?;
        match response.messages.first() {
            Some(message) if message.status == "success" => Ok(()),
            _ => Err(EmailSendError::Rejected(rejection_detail(status, &body))),
        }
    }

    pub(crate) async fn ping(&self) -> anyhow::Result<()> {
        self.client
            .get((*self.user_endpoint).clone())
            .basic_auth(
                &self.credentials.api_key,
                Some(&self.credentials.secret_key),
            )
            .send()
            .await?
            .error_for_status()
            .context("Mailjet rejected the configured credentials")?;
        Ok(())
    }
}

/// Extracts the most specific error message from a Mailjet response body.
fn rejection_detail(status: reqwest::StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorResponse>(body).ok();
    let message = parsed.and_then(|response| {
        response
            .messages
            .into_iter()
            .flat_map(|message| message.errors)
            .map(|error| error.error_message)
            .next()
            .or(response.error_message)
    });

    match message {
        Some(message) => format!("Mailjet rejected the message: {message}"),
        None if body.trim().is_empty() => format!("Mailjet rejected the message ({status})"),
        None => format!("Mailjet rejected the message ({status}): {}", body.trim()),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest<'a> {
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Message<'a> {
    from: Contact<'a>,
    to: [Contact<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Contact<'a>>,
    subject: &'a str,
    #[serde(rename = "HTMLPart", skip_serializing_if = "Option::is_none")]
    html_part: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_part: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendResponse {
    messages: Vec<MessageStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageStatus {
    status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorResponse {
    #[serde(default)]
    messages: Vec<MessageErrors>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageErrors {
    #[serde(default)]
    errors: Vec<MessageError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageError {
    error_message: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn detail_from_message_errors() {
        let body = r#"{"Messages":[{"Status":"error","Errors":[{"ErrorMessage":"Invalid sender address"}]}]}"#;

        assert_eq!(
            rejection_detail(reqwest::StatusCode::BAD_REQUEST, body),
            "Mailjet rejected the message: Invalid sender address"
        );
    }

    #[test]
    fn detail_from_top_level_error() {
        let body = r#"{"ErrorIdentifier":"x","StatusCode":401,"ErrorMessage":"API key authentication/authorization failure."}"#;

        assert_eq!(
            rejection_detail(reqwest::StatusCode::UNAUTHORIZED, body),
            "Mailjet rejected the message: API key authentication/authorization failure."
        );
    }

    #[test]
    fn detail_from_unstructured_body() {
        assert_eq!(
            rejection_detail(reqwest::StatusCode::BAD_GATEWAY, "upstream down\n"),
            "Mailjet rejected the message (502 Bad Gateway): upstream down"
        );
        assert_eq!(
            rejection_detail(reqwest::StatusCode::BAD_GATEWAY, ""),
            "Mailjet rejected the message (502 Bad Gateway)"
        );
    }
}
