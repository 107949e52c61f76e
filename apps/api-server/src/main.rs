//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::{LogFormat, init_logging};

#[cfg(feature = "rate-limit")]
use std::sync::Arc;

#[cfg(feature = "rate-limit")]
use middleware::rate_limit::RateLimitMiddleware;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_logging(LogFormat::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quill API Server on {}:{} ({})",
        config.host,
        config.port,
        config.environment
    );

    let state = web::Data::new(AppState::new(&config).await);

    #[cfg(feature = "rate-limit")]
    let limiter: Arc<dyn quill_core::ports::RateLimiter> =
        Arc::new(quill_infra::InMemoryRateLimiter::new(config.rate_limit.clone()));

    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::not_found));

        #[cfg(feature = "rate-limit")]
        let app = app.wrap(RateLimitMiddleware::new(limiter.clone()));

        app.wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
