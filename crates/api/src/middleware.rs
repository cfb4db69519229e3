//! Bearer-token authentication middleware.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use atrium_auth::{JwtClaims, validate_claims};
use atrium_core::DomainError;

use crate::app::errors;
use crate::context::IdentityContext;

#[derive(Clone)]
pub struct AuthState {
    decoding_key: Arc<DecodingKey>,
}

impl AuthState {
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(jwt_secret)),
        }
    }
}

/// Verify the bearer token and store the resolved identity in request
/// extensions.
///
/// A missing/invalid token is `Unauthenticated` (401); a token whose claims
/// cannot resolve to a well-formed identity (tenantless member, ungrantable
/// capability) fails closed as `Forbidden` (403).
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers())
        .ok_or_else(|| errors::domain_error_to_response(DomainError::Unauthenticated))?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    let decoded = jsonwebtoken::decode::<JwtClaims>(token, &state.decoding_key, &validation)
        .map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            errors::domain_error_to_response(DomainError::Unauthenticated)
        })?;

    validate_claims(&decoded.claims, Utc::now())
        .map_err(|_| errors::domain_error_to_response(DomainError::Unauthenticated))?;

    let identity = decoded
        .claims
        .to_identity()
        .map_err(|e| errors::domain_error_to_response(e.into()))?;

    req.extensions_mut().insert(IdentityContext::new(identity));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
