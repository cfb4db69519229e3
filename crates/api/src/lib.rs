//! `atrium-api` — HTTP adapter over the tenant-scoped core.
//!
//! Thin by design: handlers resolve an identity, derive a tenant scope,
//! consult the guard, call storage, and hand results to the aggregator and
//! renderers. No business rule lives in this crate.

pub mod app;
pub mod context;
pub mod middleware;
