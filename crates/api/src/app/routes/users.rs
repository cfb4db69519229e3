//! User administration endpoints.
//!
//! All target-aware rules (self-protection, role elevation, cross-tenant
//! admin actions) are enforced by the guard before storage is touched.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};

use atrium_auth::{Action, ResourceKind, Role, UserAccount, UserStatus, authorize_user_change};
use atrium_core::UserId;

use crate::app::routes::common::guard_scope;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", delete(delete_user))
        .route("/:id/deactivate", post(deactivate_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::User)?;
    let users = services
        .users()
        .find(&scope)
        .map_err(errors::storage_error_to_response)?;
    Ok(Json(users).into_response())
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Json(body): Json<dto::CreateUserRequest>,
) -> Result<Response, Response> {
    let identity = ctx.identity();
    let role = dto::parse_role(&body.role).map_err(errors::domain_error_to_response)?;

    // The target tenant is never inferred from the body for members: they
    // always act in their own tenant. Super-admins must name one.
    let tenant_id = match identity.role() {
        Role::SuperAdmin => body
            .tenant_id
            .as_deref()
            .ok_or_else(|| {
                errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    "tenant_id is required for super-admin user creation",
                )
            })?
            .parse()
            .map_err(errors::domain_error_to_response)?,
        _ => identity.tenant_id().ok_or_else(|| {
            errors::domain_error_to_response(atrium_auth::AuthzError::MissingTenant.into())
        })?,
    };

    let account = UserAccount::new(tenant_id, role, body.name);
    authorize_user_change(identity, Action::Create, &account.as_target())
        .map_err(|e| errors::domain_error_to_response(e.into()))?;

    services
        .users()
        .insert(account.clone())
        .map_err(errors::storage_error_to_response)?;

    tracing::info!(user_id = %account.user_id, tenant_id = %tenant_id, "user created");
    Ok((StatusCode::CREATED, Json(account)).into_response())
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let identity = ctx.identity();
    let scope = guard_scope(identity, Action::Delete, ResourceKind::User)?;
    let id: UserId = id.parse().map_err(errors::domain_error_to_response)?;

    // Scoped lookup: a foreign tenant's user id is NotFound, so existence
    // never leaks. The guard then re-checks the target independently.
    let account = services
        .users()
        .find_by_id(&scope, id)
        .map_err(errors::storage_error_to_response)?;

    authorize_user_change(identity, Action::Delete, &account.as_target())
        .map_err(|e| errors::domain_error_to_response(e.into()))?;

    services
        .users()
        .delete(&scope, id)
        .map_err(errors::storage_error_to_response)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn deactivate_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let identity = ctx.identity();
    let scope = guard_scope(identity, Action::Deactivate, ResourceKind::User)?;
    let id: UserId = id.parse().map_err(errors::domain_error_to_response)?;

    let mut account = services
        .users()
        .find_by_id(&scope, id)
        .map_err(errors::storage_error_to_response)?;

    authorize_user_change(identity, Action::Deactivate, &account.as_target())
        .map_err(|e| errors::domain_error_to_response(e.into()))?;

    account.status = UserStatus::Deactivated;
    services
        .users()
        .update(&scope, account.clone())
        .map_err(errors::storage_error_to_response)?;

    Ok(Json(account).into_response())
}
