//! JWT claims model (transport-agnostic).
//!
//! The minimal set of claims Atrium expects once a token has been
//! decoded/verified by whatever transport/security layer is in use.
//! Signature verification is intentionally outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use atrium_core::{TenantId, UserId};

use crate::capability::{Capability, CapabilitySet};
use crate::guard::AuthzError;
use crate::identity::{Identity, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Role granted to the subject.
    pub role: Role,

    /// Tenant context for the token. Absent only for super-admin tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,

    /// Per-resource capability grants (meaningful for `Role::User`).
    #[serde(default)]
    pub capabilities: Vec<Capability>,

    /// Issued-at timestamp (seconds since epoch on the wire).
    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    /// Expiration timestamp (seconds since epoch on the wire).
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the claims' time window.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

impl JwtClaims {
    /// Resolve claims into a verified [`Identity`].
    ///
    /// Re-applies the role/tenant invariant and validates capability grants,
    /// so a malformed token fails closed here rather than deep in a handler.
    pub fn to_identity(&self) -> Result<Identity, AuthzError> {
        let capabilities = CapabilitySet::from_grants(self.capabilities.iter().copied())?;
        Identity::new(self.sub, self.role, self.tenant_id, capabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(iat: DateTime<Utc>, exp: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            role: Role::Admin,
            tenant_id: Some(TenantId::new()),
            capabilities: Vec::new(),
            iat,
            exp,
        }
    }

    #[test]
    fn accepts_claims_inside_the_window() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(1), now + Duration::minutes(10));
        assert!(validate_claims(&c, now).is_ok());
    }

    #[test]
    fn rejects_expired_and_not_yet_valid() {
        let now = Utc::now();

        let expired = claims(now - Duration::minutes(20), now - Duration::minutes(10));
        assert_eq!(
            validate_claims(&expired, now),
            Err(TokenValidationError::Expired)
        );

        let future = claims(now + Duration::minutes(5), now + Duration::minutes(15));
        assert_eq!(
            validate_claims(&future, now),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn tenantless_member_token_does_not_resolve() {
        let now = Utc::now();
        let mut c = claims(now, now + Duration::minutes(10));
        c.role = Role::User;
        c.tenant_id = None;
        assert_eq!(c.to_identity(), Err(AuthzError::MissingTenant));
    }
}
