use std::{net::IpAddr, sync::Arc};

use axum::Router;
use kerith_core_diagnostics_contracts::DiagnosticsService;
use kerith_core_inquiry_contracts::InquiryService;
use tokio::net::TcpListener;
use tracing::info;

mod errors;
mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Inquiry, Diagnostics> {
    pub inquiry: Inquiry,
    pub diagnostics: Diagnostics,
}

impl<Inquiry, Diagnostics> RestServer<Inquiry, Diagnostics>
where
    Inquiry: InquiryService,
    Diagnostics: DiagnosticsService,
{
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let diagnostics = Arc::new(self.diagnostics);

        let router = Router::new()
            .merge(routes::health::router(Arc::clone(&diagnostics)))
            .merge(routes::diagnostics::router(diagnostics))
            .merge(routes::inquiry::router(self.inquiry.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
