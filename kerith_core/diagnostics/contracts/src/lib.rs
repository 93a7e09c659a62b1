use std::future::Future;

use kerith_email_contracts::EmailProvider;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait DiagnosticsService: Send + Sync + 'static {
    /// Check the email configuration and try to reach the active transport.
    ///
    /// Never sends a message and never exposes configured values.
    fn email_report(&self) -> impl Future<Output = EmailReport> + Send;

    /// Return the (possibly cached) health status.
    fn health(&self) -> impl Future<Output = HealthStatus> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReport {
    /// Whether each email setting is set, keyed by its environment variable.
    pub configured: Vec<(&'static str, bool)>,
    pub check: EmailCheck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailCheck {
    /// Neither Mailjet nor SMTP credentials are configured.
    NoTransport,
    /// A transport is configured, but settings required to deliver messages
    /// are missing.
    MissingSettings {
        provider: EmailProvider,
        missing: Vec<&'static str>,
    },
    Unreachable {
        provider: EmailProvider,
        error: String,
    },
    Ok {
        provider: EmailProvider,
    },
}

impl EmailCheck {
    pub fn provider(&self) -> Option<EmailProvider> {
        match *self {
            Self::NoTransport => None,
            Self::MissingSettings { provider, .. }
            | Self::Unreachable { provider, .. }
            | Self::Ok { provider } => Some(provider),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub email: bool,
}

#[cfg(feature = "mock")]
impl MockDiagnosticsService {
    pub fn with_email_report(mut self, report: EmailReport) -> Self {
        self.expect_email_report()
            .once()
            .return_once(move || Box::pin(std::future::ready(report)));
        self
    }

    pub fn with_health(mut self, status: HealthStatus) -> Self {
        self.expect_health()
            .once()
            .return_once(move || Box::pin(std::future::ready(status)));
        self
    }
}
