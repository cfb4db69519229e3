//! Tenant scope filter.
//!
//! Turns a verified identity into the data predicate every read and write
//! path must evaluate before touching storage. A record id alone is never
//! enough context to load from unscoped storage.

use atrium_core::TenantId;

use crate::guard::AuthzError;
use crate::identity::{Identity, Role};

/// The partition of data a caller may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// No restriction. Only reachable by super-admins.
    All,
    /// Restricted to a single tenant.
    Tenant(TenantId),
}

impl TenantScope {
    /// Derive the scope for an identity.
    ///
    /// Fails closed: a non-super-admin identity without a tenant is rejected
    /// outright rather than resolved to "everything" or "nothing".
    pub fn for_identity(identity: &Identity) -> Result<Self, AuthzError> {
        match identity.role() {
            Role::SuperAdmin => Ok(TenantScope::All),
            _ => identity
                .tenant_id()
                .map(TenantScope::Tenant)
                .ok_or(AuthzError::MissingTenant),
        }
    }

    /// Explicitly narrow to a single tenant on behalf of the caller.
    ///
    /// This is the only "act as tenant X" path. Super-admins may pick any
    /// tenant; everyone else may only name their own (the tenant is never
    /// inferred from client-supplied fields).
    pub fn act_as(identity: &Identity, tenant_id: TenantId) -> Result<Self, AuthzError> {
        match identity.role() {
            Role::SuperAdmin => Ok(TenantScope::Tenant(tenant_id)),
            _ => {
                let own = identity.tenant_id().ok_or(AuthzError::MissingTenant)?;
                if own == tenant_id {
                    Ok(TenantScope::Tenant(tenant_id))
                } else {
                    Err(AuthzError::TenantMismatch)
                }
            }
        }
    }

    /// Whether a record belonging to `record_tenant` is visible under this
    /// scope.
    pub fn permits(&self, record_tenant: TenantId) -> bool {
        match self {
            TenantScope::All => true,
            TenantScope::Tenant(id) => *id == record_tenant,
        }
    }

    /// The single tenant this scope is restricted to, if any.
    pub fn tenant(&self) -> Option<TenantId> {
        match self {
            TenantScope::All => None,
            TenantScope::Tenant(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::UserId;
    use proptest::prelude::*;

    proptest! {
        /// For any two distinct tenants, a member scope over one never
        /// permits records of the other, and always permits its own.
        #[test]
        fn member_scope_never_leaks_across_tenants(a in any::<u128>(), b in any::<u128>()) {
            prop_assume!(a != b);
            let tenant_a = TenantId::from_uuid(uuid::Uuid::from_u128(a));
            let tenant_b = TenantId::from_uuid(uuid::Uuid::from_u128(b));
            let identity = Identity::member(UserId::new(), Role::User, tenant_a);

            let scope = TenantScope::for_identity(&identity).unwrap();
            prop_assert!(scope.permits(tenant_a));
            prop_assert!(!scope.permits(tenant_b));
        }
    }

    #[test]
    fn member_scope_admits_only_its_own_tenant() {
        let tenant = TenantId::new();
        let other = TenantId::new();
        let identity = Identity::member(UserId::new(), Role::User, tenant);

        let scope = TenantScope::for_identity(&identity).unwrap();
        assert!(scope.permits(tenant));
        assert!(!scope.permits(other));
    }

    #[test]
    fn super_admin_scope_is_universal() {
        let identity = Identity::super_admin(UserId::new());
        let scope = TenantScope::for_identity(&identity).unwrap();

        for _ in 0..8 {
            assert!(scope.permits(TenantId::new()));
        }
    }

    #[test]
    fn tenantless_member_fails_closed() {
        // Should be unrepresentable via Identity::new; the filter still
        // refuses to guess if such an identity reaches it.
        let identity = Identity::unchecked(UserId::new(), Role::User, None);
        assert_eq!(
            TenantScope::for_identity(&identity),
            Err(AuthzError::MissingTenant)
        );
    }

    #[test]
    fn act_as_is_super_admin_only_for_foreign_tenants() {
        let sa = Identity::super_admin(UserId::new());
        let tenant = TenantId::new();
        assert_eq!(
            TenantScope::act_as(&sa, tenant).unwrap(),
            TenantScope::Tenant(tenant)
        );

        let admin = Identity::member(UserId::new(), Role::Admin, TenantId::new());
        assert_eq!(
            TenantScope::act_as(&admin, tenant),
            Err(AuthzError::TenantMismatch)
        );
        // Naming one's own tenant is allowed.
        let own = admin.tenant_id().unwrap();
        assert_eq!(
            TenantScope::act_as(&admin, own).unwrap(),
            TenantScope::Tenant(own)
        );
    }
}
