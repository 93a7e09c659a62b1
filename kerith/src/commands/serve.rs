use kerith_config::Config;
use kerith_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;
    match email.provider() {
        Some(provider) => {
            info!("Connecting to {provider}");
            if let Err(err) = email.ping().await {
                warn!("Failed to reach {provider}, delivery will likely fail: {err:#}");
            }
        }
        None => warn!("No email transport configured, inquiries cannot be delivered"),
    }
    if config.email.from_email.is_none() {
        warn!("SMTP_FROM_EMAIL is not set, inquiries cannot be delivered");
    }
    if config.email.to_email.is_none() {
        warn!("SMTP_TO_EMAIL is not set, inquiries cannot be delivered");
    }

    let server = environment::build(&config, email)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
