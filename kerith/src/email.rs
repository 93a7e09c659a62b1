use anyhow::Context;
use kerith_config::EmailConfig;
use kerith_email_impl::{
    EmailSender, EmailServiceImpl, EmailTransportSettings, MAILJET_API_URL, SMTP_DEFAULT_PORT,
};
use url::Url;

/// Set up the email service for the configured transport.
///
/// Succeeds even if no transport is configured; sending then fails with a
/// configuration error.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(transport_settings(config)?, sender(config))
        .context("Failed to set up email transport")
}

/// Mailjet is used if both API keys are set, SMTP if host, user and password
/// are set.
pub fn transport_settings(config: &EmailConfig) -> anyhow::Result<Option<EmailTransportSettings>> {
    let mailjet = &config.mailjet;
    if let (Some(api_key), Some(secret_key)) = (&mailjet.api_key, &mailjet.secret_key) {
        let endpoint = match &mailjet.api_url {
            Some(url) => url.clone(),
            None => Url::parse(MAILJET_API_URL)?,
        };
        return Ok(Some(EmailTransportSettings::Mailjet {
            api_key: api_key.expose().into(),
            secret_key: secret_key.expose().into(),
            endpoint,
        }));
    }

    let smtp = &config.smtp;
    if let (Some(host), Some(user), Some(password)) = (&smtp.host, &smtp.user, &smtp.password) {
        return Ok(Some(EmailTransportSettings::Smtp {
            host: host.clone(),
            port: smtp.port.unwrap_or(SMTP_DEFAULT_PORT),
            user: user.clone(),
            password: password.expose().into(),
        }));
    }

    Ok(None)
}

pub fn sender(config: &EmailConfig) -> Option<EmailSender> {
    config.from_email.clone().map(|address| EmailSender {
        address,
        name: config.from_name.clone(),
    })
}
