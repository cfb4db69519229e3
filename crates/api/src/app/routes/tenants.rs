//! Explicit act-as-tenant routes.
//!
//! The only way to operate on a named tenant. `TenantScope::act_as`
//! restricts foreign tenants to super-admins; members may only name their
//! own tenant, so these routes are equivalent to the plain ones for them.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    response::Response,
    routing::{get, post},
};

use atrium_auth::{Action, ResourceKind, TenantScope, authorize};
use atrium_core::TenantId;

use crate::app::routes::cashflow;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/:tenant_id/cashflow", post(create_entry_as_tenant))
        .route("/:tenant_id/cashflow/summary", get(summary_as_tenant))
}

fn act_as_scope(
    ctx: &IdentityContext,
    action: Action,
    raw_tenant: &str,
) -> Result<TenantScope, Response> {
    let tenant_id: TenantId = raw_tenant
        .parse()
        .map_err(errors::domain_error_to_response)?;

    authorize(ctx.identity(), action, ResourceKind::CashFlow)
        .map_err(|e| errors::domain_error_to_response(e.into()))?;
    TenantScope::act_as(ctx.identity(), tenant_id)
        .map_err(|e| errors::domain_error_to_response(e.into()))
}

pub async fn summary_as_tenant(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Path(tenant_id): Path<String>,
    Query(query): Query<dto::CashflowQuery>,
) -> Result<Response, Response> {
    let scope = act_as_scope(&ctx, Action::Read, &tenant_id)?;
    cashflow::summary_in_scope(&services, &scope, &query).await
}

pub async fn create_entry_as_tenant(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Path(tenant_id): Path<String>,
    Json(body): Json<dto::CreateEntryRequest>,
) -> Result<Response, Response> {
    let scope = act_as_scope(&ctx, Action::Create, &tenant_id)?;
    cashflow::create_entry_in_scope(&services, &scope, body).await
}
