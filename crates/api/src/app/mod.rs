//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: storage wiring behind trait objects
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and field validation
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(jwt_secret: &[u8]) -> Router {
    let auth_state = middleware::AuthState::new(jwt_secret);
    let services = Arc::new(services::AppServices::new());

    // Protected routes: require a verified identity.
    let protected = routes::router().layer(
        tower::ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(Extension(services)),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
