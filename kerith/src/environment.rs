use std::{sync::Arc, time::Duration};

use kerith_config::Config;
use kerith_core_diagnostics_impl::{DiagnosticsServiceConfig, DiagnosticsServiceImpl};
use kerith_core_inquiry_impl::{InquiryServiceConfig, InquiryServiceImpl};
use kerith_email_impl::EmailServiceImpl;
use kerith_shared_impl::time::TimeServiceImpl;
use kerith_templates_impl::TemplateServiceImpl;

/// How long the result of a health check is reused.
pub const HEALTH_CACHE_TTL: Duration = Duration::from_secs(10);

// Shared
pub type Time = TimeServiceImpl;
pub type Email = EmailServiceImpl;
pub type Template = TemplateServiceImpl;

// Core
pub type Inquiry = InquiryServiceImpl<Time, Email, Template>;
pub type Diagnostics = DiagnosticsServiceImpl<Time, Email>;

// API
pub type RestServer = kerith_api_rest::RestServer<Inquiry, Diagnostics>;

/// Wire up all services.
pub fn build(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let time = TimeServiceImpl;
    let template = TemplateServiceImpl::new()?;

    let inquiry = InquiryServiceImpl {
        time,
        email: email.clone(),
        template,
        config: InquiryServiceConfig {
            recipient: config.email.to_email.clone().map(Arc::new),
        },
    };

    let diagnostics = DiagnosticsServiceImpl {
        time,
        email,
        config: DiagnosticsServiceConfig {
            settings: config.email.presence().into(),
            health_cache_ttl: HEALTH_CACHE_TTL,
        },
        state: Default::default(),
    };

    Ok(RestServer {
        inquiry,
        diagnostics,
    })
}
