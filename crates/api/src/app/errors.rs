//! Error-to-status mapping: a thin adapter over the domain taxonomy.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use atrium_core::DomainError;
use atrium_reports::RenderError;
use atrium_storage::StorageError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let (status, code) = match &err {
        DomainError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
        DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
        DomainError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
        DomainError::Aggregation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "aggregation_error"),
    };
    json_error(status, code, err.to_string())
}

pub fn storage_error_to_response(err: StorageError) -> axum::response::Response {
    domain_error_to_response(err.into())
}

pub fn render_error_to_response(err: RenderError) -> axum::response::Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "render_error",
        err.to_string(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
