//! Caller identity as handed over by the authentication layer.

use serde::{Deserialize, Serialize};

use atrium_core::{TenantId, UserId};

use crate::capability::CapabilitySet;
use crate::guard::AuthzError;

/// Role of an authenticated caller.
///
/// The role set is closed: policy is a fixed matrix over these three roles,
/// not an open-ended string space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified caller identity.
///
/// Invariant: `tenant_id` is `None` only for [`Role::SuperAdmin`]. The
/// constructor rejects the mismatch, and the scope filter re-checks it so
/// an identity that bypassed construction still fails closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    role: Role,
    tenant_id: Option<TenantId>,
    capabilities: CapabilitySet,
}

impl Identity {
    /// Build an identity, enforcing the role/tenant invariant.
    pub fn new(
        user_id: UserId,
        role: Role,
        tenant_id: Option<TenantId>,
        capabilities: CapabilitySet,
    ) -> Result<Self, AuthzError> {
        if role != Role::SuperAdmin && tenant_id.is_none() {
            return Err(AuthzError::MissingTenant);
        }
        Ok(Self {
            user_id,
            role,
            tenant_id,
            capabilities,
        })
    }

    /// A super-admin identity (no tenant binding).
    pub fn super_admin(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::SuperAdmin,
            tenant_id: None,
            capabilities: CapabilitySet::empty(),
        }
    }

    /// An identity bound to a tenant.
    pub fn member(user_id: UserId, role: Role, tenant_id: TenantId) -> Self {
        Self {
            user_id,
            role,
            tenant_id: Some(tenant_id),
            capabilities: CapabilitySet::empty(),
        }
    }

    /// Test-only escape hatch: build an identity without the role/tenant
    /// invariant, so fail-closed behavior downstream can be exercised.
    #[cfg(test)]
    pub(crate) fn unchecked(user_id: UserId, role: Role, tenant_id: Option<TenantId>) -> Self {
        Self {
            user_id,
            role,
            tenant_id,
            capabilities: CapabilitySet::empty(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_super_admin_without_tenant_is_rejected() {
        let err = Identity::new(UserId::new(), Role::User, None, CapabilitySet::empty())
            .unwrap_err();
        assert_eq!(err, AuthzError::MissingTenant);

        let err = Identity::new(UserId::new(), Role::Admin, None, CapabilitySet::empty())
            .unwrap_err();
        assert_eq!(err, AuthzError::MissingTenant);
    }

    #[test]
    fn super_admin_may_have_no_tenant() {
        let identity =
            Identity::new(UserId::new(), Role::SuperAdmin, None, CapabilitySet::empty())
                .unwrap();
        assert_eq!(identity.tenant_id(), None);
    }
}
