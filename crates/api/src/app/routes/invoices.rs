//! Invoice endpoints: listing, creation, summary, export.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use atrium_auth::{Action, ResourceKind};
use atrium_core::RecordId;
use atrium_finance::summarize_invoices;
use atrium_reports::{invoice_summary_lines, invoice_table, render_csv};

use crate::app::routes::common::{download, guard_scope};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/:id", get(get_invoice))
        .route("/summary", get(summary))
        .route("/export.csv", get(export_csv))
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::Invoice)?;
    let invoices = services
        .invoices()
        .find(&scope)
        .map_err(errors::storage_error_to_response)?;
    Ok(Json(invoices).into_response())
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::Invoice)?;
    let id: RecordId = id
        .parse()
        .map_err(errors::domain_error_to_response)?;

    // Absent and cross-tenant ids both surface as NotFound here, so a
    // caller cannot probe another tenant's invoice numbers.
    let invoice = services
        .invoices()
        .find_by_id(&scope, id)
        .map_err(errors::storage_error_to_response)?;

    Ok(Json(invoice).into_response())
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Json(body): Json<dto::CreateInvoiceRequest>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Create, ResourceKind::Invoice)?;
    let tenant_id = scope.tenant().ok_or_else(|| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "no tenant context: use the explicit per-tenant route",
        )
    })?;

    let invoice = body
        .into_invoice(tenant_id)
        .map_err(errors::domain_error_to_response)?;

    services
        .invoices()
        .insert(invoice.clone())
        .map_err(errors::storage_error_to_response)?;

    Ok((StatusCode::CREATED, Json(invoice)).into_response())
}

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::Invoice)?;
    let invoices = services
        .invoices()
        .find(&scope)
        .map_err(errors::storage_error_to_response)?;
    Ok(Json(summarize_invoices(&invoices)).into_response())
}

pub async fn export_csv(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
) -> Result<Response, Response> {
    let scope = guard_scope(ctx.identity(), Action::Read, ResourceKind::Invoice)?;
    let invoices = services
        .invoices()
        .find(&scope)
        .map_err(errors::storage_error_to_response)?;

    let summary = summarize_invoices(&invoices);
    let bytes = render_csv(&invoice_table(&invoices), &invoice_summary_lines(&summary))
        .map_err(errors::render_error_to_response)?;

    Ok(download("text/csv; charset=utf-8", "invoices.csv", bytes))
}
