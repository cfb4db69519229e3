use axum::Router;

pub mod cashflow;
pub mod common;
pub mod invoices;
pub mod system;
pub mod tenants;
pub mod users;

/// All protected routes (auth middleware applied by the caller).
pub fn router() -> Router {
    Router::new()
        .nest("/cashflow", cashflow::router())
        .nest("/invoices", invoices::router())
        .nest("/users", users::router())
        .nest("/tenants", tenants::router())
}
