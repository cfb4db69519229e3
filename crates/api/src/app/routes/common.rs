//! Shared handler plumbing.

use axum::http::header;
use axum::response::{IntoResponse, Response};

use atrium_auth::{Action, Identity, ResourceKind, TenantScope, authorize};

use crate::app::errors;

/// Guard the action, then derive the caller's tenant scope.
///
/// Both failure modes are authorization failures (403); the scope side
/// fails closed on a tenantless member identity.
pub fn guard_scope(
    identity: &Identity,
    action: Action,
    resource: ResourceKind,
) -> Result<TenantScope, Response> {
    authorize(identity, action, resource)
        .map_err(|e| errors::domain_error_to_response(e.into()))?;
    TenantScope::for_identity(identity).map_err(|e| errors::domain_error_to_response(e.into()))
}

/// Wrap export bytes as a download response with a filename hint.
pub fn download(content_type: &'static str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
