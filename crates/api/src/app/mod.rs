//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store handle, dashboard/export facades, prediction runner
//! - `routes/`: handlers, one file per area, plus the guarded route table
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router from configuration (used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(build_app_with_services(config.jwt_secret.clone(), services))
}

/// Build the router around already-wired services.
pub fn build_app_with_services(jwt_secret: String, services: AppServices) -> Router {
    let jwt = Arc::new(stratboard_auth::Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    auth_state,
                    middleware::auth_middleware,
                ))
                .layer(Extension(Arc::new(services))),
        )
}
