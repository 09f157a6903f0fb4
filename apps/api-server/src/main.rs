//! # Chronicle API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpResponse, HttpServer, middleware::Condition, web};
use chronicle_shared::ErrorResponse;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use chronicle_core::ports::{PasswordService, RateLimiter, TokenService};
use chronicle_infra::{Argon2PasswordService, InMemoryRateLimiter, JwtTokenService};

use config::AppConfig;
use middleware::rate_limit::RateLimitMiddleware;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    tracing::info!(
        "Starting Chronicle API server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(&config.database, config.admin_emails.clone())
        .await
        .map_err(std::io::Error::other)?;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let rate_limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::from_env());
    let rate_limit_enabled = config.rate_limit_enabled;

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .wrap(Condition::new(
                rate_limit_enabled,
                RateLimitMiddleware::new(rate_limiter.clone()),
            ))
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            // Malformed bodies get the same RFC 7807 shape as every other error.
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let detail = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail)),
                )
                .into()
            }))
            .configure(handlers::configure_routes)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
