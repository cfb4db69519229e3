//! `atrium-auth` — pure authorization boundary for the multi-tenant core.
//!
//! This crate is intentionally decoupled from HTTP and storage. It answers
//! two questions and nothing else: *which rows may this caller touch*
//! (tenant scope) and *is this caller allowed to perform this action at all*
//! (resource guard).

pub mod capability;
pub mod claims;
pub mod guard;
pub mod identity;
pub mod scope;
pub mod user;

pub use capability::{Access, Capability, CapabilitySet, ResourceKind};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use guard::{
    Action, AuthzError, UserTarget, authorize, authorize_user_change, ensure_tenant_access,
};
pub use identity::{Identity, Role};
pub use scope::TenantScope;
pub use user::{UserAccount, UserStatus};
