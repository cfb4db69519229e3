//! Cash-flow endpoints: listing, creation, summaries, exports.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};

use atrium_auth::{Action, ResourceKind, TenantScope};
use atrium_core::RecordId;
use atrium_finance::{EntryType, grouped_from_rows, summarize};
use atrium_reports::{DocumentOptions, cashflow_summary_lines, ledger_table, render_csv, render_document};
use atrium_storage::GroupKey;

use crate::app::routes::common::{download, guard_scope};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/:id", delete(delete_entry))
        .route("/summary", get(summary))
        .route("/summary/by-category", get(summary_by_category))
        .route("/summary/by-payment-method", get(summary_by_payment_method))
        .route("/export.csv", get(export_csv))
        .route("/export.txt", get(export_document))
}

pub async fn list_entries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Query(query): Query<dto::CashflowQuery>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::CashFlow)?;
    let filter = query.to_filter().map_err(errors::domain_error_to_response)?;

    let entries = services
        .ledger()
        .find(&scope, &filter)
        .map_err(errors::storage_error_to_response)?;

    Ok(Json(entries).into_response())
}

pub async fn create_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Json(body): Json<dto::CreateEntryRequest>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Create, ResourceKind::CashFlow)?;
    create_entry_in_scope(&services, &scope, body).await
}

/// Create under an already-derived scope. Shared with the explicit
/// act-as-tenant path.
pub(crate) async fn create_entry_in_scope(
    services: &AppServices,
    scope: &TenantScope,
    body: dto::CreateEntryRequest,
) -> Result<Response, Response> {
    // A universal scope carries no tenant to write into; super-admins
    // create through /tenants/{tenant_id}/cashflow.
    let tenant_id = scope.tenant().ok_or_else(|| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "no tenant context: use the explicit per-tenant route",
        )
    })?;

    let entry = body
        .into_entry(tenant_id)
        .map_err(errors::domain_error_to_response)?;

    services
        .ledger()
        .insert(entry.clone())
        .map_err(errors::storage_error_to_response)?;

    tracing::info!(entry_id = %entry.id, tenant_id = %tenant_id, "ledger entry created");
    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

pub async fn delete_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Delete, ResourceKind::CashFlow)?;
    let id: RecordId = id.parse().map_err(errors::domain_error_to_response)?;

    // Scoped delete: a foreign tenant's entry id reads as NotFound.
    services
        .ledger()
        .delete(&scope, id)
        .map_err(errors::storage_error_to_response)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Query(query): Query<dto::CashflowQuery>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::CashFlow)?;
    summary_in_scope(&services, &scope, &query).await
}

pub(crate) async fn summary_in_scope(
    services: &AppServices,
    scope: &TenantScope,
    query: &dto::CashflowQuery,
) -> Result<Response, Response> {
    let filter = query.to_filter().map_err(errors::domain_error_to_response)?;

    let entries = services
        .ledger()
        .find(scope, &filter)
        .map_err(errors::storage_error_to_response)?;

    Ok(Json(summarize(&entries)).into_response())
}

pub async fn summary_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Query(query): Query<dto::CashflowQuery>,
) -> Result<Response, Response> {
    grouped_summary(&services, &ctx, &query, GroupKey::Category).await
}

pub async fn summary_by_payment_method(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Query(query): Query<dto::CashflowQuery>,
) -> Result<Response, Response> {
    grouped_summary(&services, &ctx, &query, GroupKey::PaymentMethod).await
}

async fn grouped_summary(
    services: &AppServices,
    ctx: &IdentityContext,
    query: &dto::CashflowQuery,
    key: GroupKey,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::CashFlow)?;
    let filter = query
        .to_filter()
        .map_err(errors::domain_error_to_response)?
        .without_cancelled();

    let income = services
        .ledger()
        .group_sum(
            &scope,
            &filter.clone().with_entry_type(EntryType::Income),
            key,
        )
        .map_err(errors::storage_error_to_response)?;
    let expense = services
        .ledger()
        .group_sum(&scope, &filter.with_entry_type(EntryType::Expense), key)
        .map_err(errors::storage_error_to_response)?;

    let groups =
        grouped_from_rows(income, expense).map_err(errors::domain_error_to_response)?;

    Ok(Json(groups).into_response())
}

pub async fn export_csv(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Query(query): Query<dto::CashflowQuery>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::CashFlow)?;
    let filter = query.to_filter().map_err(errors::domain_error_to_response)?;

    let entries = services
        .ledger()
        .find(&scope, &filter)
        .map_err(errors::storage_error_to_response)?;

    // The renderer is a pure projection: the summary it prints is computed
    // here, over exactly the rows it prints.
    let summary = summarize(&entries);
    let bytes = render_csv(&ledger_table(&entries), &cashflow_summary_lines(&summary))
        .map_err(errors::render_error_to_response)?;

    Ok(download("text/csv; charset=utf-8", "cash-flow.csv", bytes))
}

pub async fn export_document(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Query(query): Query<dto::CashflowQuery>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::CashFlow)?;
    let filter = query.to_filter().map_err(errors::domain_error_to_response)?;

    let entries = services
        .ledger()
        .find(&scope, &filter)
        .map_err(errors::storage_error_to_response)?;

    let summary = summarize(&entries);
    let bytes = render_document(
        &ledger_table(&entries),
        &cashflow_summary_lines(&summary),
        &DocumentOptions::new("Cash flow report"),
    )
    .map_err(errors::render_error_to_response)?;

    Ok(download(
        "text/plain; charset=utf-8",
        "cash-flow.txt",
        bytes,
    ))
}
