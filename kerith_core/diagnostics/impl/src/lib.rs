use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use kerith_core_diagnostics_contracts::{DiagnosticsService, EmailCheck, EmailReport, HealthStatus};
use kerith_email_contracts::EmailService;
use kerith_shared_contracts::time::TimeService;
use tokio::sync::RwLock;
use tracing::error;

/// Settings without which no message can be delivered, even if a transport
/// is configured.
pub const REQUIRED_SETTINGS: &[&str] = &["SMTP_FROM_EMAIL", "SMTP_FROM_NAME", "SMTP_TO_EMAIL"];

#[derive(Debug, Clone)]
pub struct DiagnosticsServiceImpl<Time, Email> {
    pub time: Time,
    pub email: Email,
    pub config: DiagnosticsServiceConfig,
    pub state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct DiagnosticsServiceConfig {
    /// Whether each email setting is set, keyed by its environment variable.
    pub settings: Arc<[(&'static str, bool)]>,
    pub health_cache_ttl: Duration,
}

#[derive(Debug, Default)]
pub struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl<Time, Email> DiagnosticsServiceImpl<Time, Email> {
    fn missing_settings(&self) -> Vec<&'static str> {
        REQUIRED_SETTINGS
            .iter()
            .copied()
            .filter(|&required| {
                !self
                    .config
                    .settings
                    .iter()
                    .any(|&(name, set)| name == required && set)
            })
            .collect()
    }
}

impl<Time, Email> DiagnosticsService for DiagnosticsServiceImpl<Time, Email>
where
    Time: TimeService,
    Email: EmailService,
{
    async fn email_report(&self) -> EmailReport {
        let configured = self.config.settings.to_vec();

        let Some(provider) = self.email.provider() else {
            return EmailReport {
                configured,
                check: EmailCheck::NoTransport,
            };
        };

        let missing = self.missing_settings();
        if !missing.is_empty() {
            return EmailReport {
                configured,
                check: EmailCheck::MissingSettings { provider, missing },
            };
        }

        let check = match self.email.ping().await {
            Ok(()) => EmailCheck::Ok { provider },
            Err(err) => {
                error!("Failed to reach {provider}: {err:#}");
                EmailCheck::Unreachable {
                    provider,
                    error: format!("{err:#}"),
                }
            }
        };

        EmailReport { configured, check }
    }

    async fn health(&self) -> HealthStatus {
        let now = self.time.now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.health_cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.health_cache_ttl)
        {
            return cached.status;
        }

        let email = self.email.provider().is_some()
            && self
                .email
                .ping()
                .await
                .inspect_err(|err| error!("Failed to ping email transport: {err:#}"))
                .is_ok();

        cache_guard
            .insert(CachedStatus {
                status: HealthStatus { email },
                timestamp: now,
            })
            .status
    }
}
