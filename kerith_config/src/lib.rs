use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use kerith_models::email_address::EmailAddress;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files take precedence.
pub const CONFIG_PATHS_VAR: &str = "KERITH_CONFIG";

/// Environment variables which override individual config keys.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HTTP_HOST", "http.host"),
    ("HTTP_PORT", "http.port"),
    ("MAILJET_API_KEY", "email.mailjet.api_key"),
    ("MAILJET_SECRET_KEY", "email.mailjet.secret_key"),
    ("MAILJET_API_URL", "email.mailjet.api_url"),
    ("SMTP_HOST", "email.smtp.host"),
    ("SMTP_PORT", "email.smtp.port"),
    ("SMTP_USER", "email.smtp.user"),
    ("SMTP_PASSWORD", "email.smtp.password"),
    ("SMTP_FROM_EMAIL", "email.from_email"),
    ("SMTP_FROM_NAME", "email.from_name"),
    ("SMTP_TO_EMAIL", "email.to_email"),
];

/// Load the config from the files listed in `KERITH_CONFIG` (or the default
/// config file) and the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var(CONFIG_PATHS_VAR) {
        Ok(paths) => paths.split(':').map(PathBuf::from).collect(),
        Err(_) => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };
    load_from(&paths, |var| std::env::var(var).ok())
}

/// Load the config from `paths`, applying the [`ENV_OVERRIDES`] looked up via
/// `env`. Empty variables are ignored.
pub fn load_from(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            let value = env(var).filter(|value| !value.trim().is_empty());
            builder.set_override_option(key, value)
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    /// Address all messages are sent from.
    pub from_email: Option<EmailAddress>,
    /// Display name used when the sender does not provide one.
    pub from_name: Option<String>,
    /// Address all inquiries are delivered to.
    pub to_email: Option<EmailAddress>,
    #[serde(default)]
    pub mailjet: MailjetConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct MailjetConfig {
    pub api_key: Option<Secret>,
    pub secret_key: Option<Secret>,
    pub api_url: Option<Url>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<Secret>,
}

impl EmailConfig {
    /// Reports which of the email related settings are set, keyed by the
    /// environment variable which configures them. Values are never exposed.
    pub fn presence(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("MAILJET_API_KEY", self.mailjet.api_key.is_some()),
            ("MAILJET_SECRET_KEY", self.mailjet.secret_key.is_some()),
            ("SMTP_HOST", self.smtp.host.is_some()),
            ("SMTP_PORT", self.smtp.port.is_some()),
            ("SMTP_USER", self.smtp.user.is_some()),
            ("SMTP_PASSWORD", self.smtp.password.is_some()),
            ("SMTP_FROM_EMAIL", self.from_email.is_some()),
            ("SMTP_FROM_NAME", self.from_name.is_some()),
            ("SMTP_TO_EMAIL", self.to_email.is_some()),
        ]
    }
}

/// A config value which must not show up in logs.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[redacted]")
    }
}
