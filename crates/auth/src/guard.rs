//! Resource access guard.
//!
//! Decides whether a role may perform an action on a resource kind at all,
//! independent of which rows the tenant scope later admits. Pure policy:
//! no IO, no panics.

use thiserror::Error;

use atrium_core::{DomainError, TenantId, UserId};

use crate::capability::{Access, ResourceKind};
use crate::identity::{Identity, Role};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    /// Non-super-admin identity without a tenant. Ambiguous scope must fail
    /// closed, never resolve to "all records" or "no records".
    #[error("identity has no tenant context")]
    MissingTenant,

    #[error("tenant mismatch")]
    TenantMismatch,

    #[error("forbidden: {role} may not {action} {resource}")]
    Forbidden {
        role: Role,
        action: Action,
        resource: ResourceKind,
    },

    /// Deleting or deactivating one's own account is blocked for all roles.
    #[error("an account may not delete or deactivate itself")]
    SelfProtection,

    /// An admin may not create or promote a user above `Role::User`.
    #[error("admins may only manage users with the user role")]
    RoleElevation,

    #[error("capability cannot be granted for resource kind '{0}'")]
    InvalidGrant(ResourceKind),
}

impl From<AuthzError> for DomainError {
    fn from(err: AuthzError) -> Self {
        DomainError::Forbidden(err.to_string())
    }
}

/// Operation the caller is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Deactivate,
}

impl Action {
    fn required_access(&self) -> Access {
        match self {
            Action::Read => Access::Read,
            _ => Access::Write,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Deactivate => "deactivate",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user record an administrative action is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTarget {
    pub user_id: UserId,
    pub role: Role,
    pub tenant_id: TenantId,
}

/// Role/resource policy matrix.
///
/// Tenant administration is super-admin only; user administration is
/// admin-and-up (target-aware rules in [`authorize_user_change`]); business
/// records are open to admins and capability-gated for plain users.
pub fn authorize(
    identity: &Identity,
    action: Action,
    resource: ResourceKind,
) -> Result<(), AuthzError> {
    let deny = || AuthzError::Forbidden {
        role: identity.role(),
        action,
        resource,
    };

    match resource {
        ResourceKind::Tenant => match identity.role() {
            Role::SuperAdmin => Ok(()),
            _ => Err(deny()),
        },
        ResourceKind::User => match identity.role() {
            Role::SuperAdmin | Role::Admin => Ok(()),
            Role::User => Err(deny()),
        },
        _ => match identity.role() {
            Role::SuperAdmin | Role::Admin => Ok(()),
            Role::User => {
                if identity
                    .capabilities()
                    .allows(resource, action.required_access())
                {
                    Ok(())
                } else {
                    Err(deny())
                }
            }
        },
    }
}

/// Target-aware authorization for user administration.
///
/// Enforced here, not merely documented:
/// - nobody deletes or deactivates their own account, regardless of role;
/// - an admin never creates or promotes a user above `Role::User`;
/// - an admin never deletes another admin;
/// - an admin never acts on a user outside their own tenant, independent of
///   whether the id lookup succeeded.
pub fn authorize_user_change(
    identity: &Identity,
    action: Action,
    target: &UserTarget,
) -> Result<(), AuthzError> {
    authorize(identity, action, ResourceKind::User)?;

    if matches!(action, Action::Delete | Action::Deactivate)
        && target.user_id == identity.user_id()
    {
        return Err(AuthzError::SelfProtection);
    }

    if identity.role() == Role::Admin {
        ensure_tenant_access(identity, target.tenant_id)?;

        if matches!(action, Action::Create | Action::Update) && target.role != Role::User {
            return Err(AuthzError::RoleElevation);
        }

        if action == Action::Delete && target.role != Role::User {
            return Err(AuthzError::Forbidden {
                role: identity.role(),
                action,
                resource: ResourceKind::User,
            });
        }
    }

    Ok(())
}

/// Verify a record's tenant against the caller's, independently of any id
/// lookup. Super-admins pass for every tenant.
pub fn ensure_tenant_access(identity: &Identity, record_tenant: TenantId) -> Result<(), AuthzError> {
    match identity.role() {
        Role::SuperAdmin => Ok(()),
        _ => {
            let own = identity.tenant_id().ok_or(AuthzError::MissingTenant)?;
            if own == record_tenant {
                Ok(())
            } else {
                Err(AuthzError::TenantMismatch)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Capability, CapabilitySet};

    fn admin() -> Identity {
        Identity::member(UserId::new(), Role::Admin, TenantId::new())
    }

    #[test]
    fn only_super_admin_manages_tenants() {
        let sa = Identity::super_admin(UserId::new());
        assert!(authorize(&sa, Action::Create, ResourceKind::Tenant).is_ok());

        let admin = admin();
        assert!(matches!(
            authorize(&admin, Action::Create, ResourceKind::Tenant),
            Err(AuthzError::Forbidden { .. })
        ));
    }

    #[test]
    fn plain_user_needs_a_capability_for_business_records() {
        let tenant = TenantId::new();
        let user = Identity::member(UserId::new(), Role::User, tenant).with_capabilities(
            CapabilitySet::from_grants([Capability::read(ResourceKind::CashFlow)]).unwrap(),
        );

        assert!(authorize(&user, Action::Read, ResourceKind::CashFlow).is_ok());
        assert!(authorize(&user, Action::Create, ResourceKind::CashFlow).is_err());
        assert!(authorize(&user, Action::Read, ResourceKind::Invoice).is_err());
    }

    #[test]
    fn self_deactivation_is_blocked_for_every_role() {
        for role in [Role::SuperAdmin, Role::Admin] {
            let identity = match role {
                Role::SuperAdmin => Identity::super_admin(UserId::new()),
                _ => Identity::member(UserId::new(), role, TenantId::new()),
            };
            let target = UserTarget {
                user_id: identity.user_id(),
                role,
                tenant_id: identity.tenant_id().unwrap_or_default(),
            };
            assert_eq!(
                authorize_user_change(&identity, Action::Deactivate, &target),
                Err(AuthzError::SelfProtection)
            );
            assert_eq!(
                authorize_user_change(&identity, Action::Delete, &target),
                Err(AuthzError::SelfProtection)
            );
        }
    }

    #[test]
    fn admin_cannot_create_above_user_role() {
        let admin = admin();
        let target = UserTarget {
            user_id: UserId::new(),
            role: Role::Admin,
            tenant_id: admin.tenant_id().unwrap(),
        };
        assert_eq!(
            authorize_user_change(&admin, Action::Create, &target),
            Err(AuthzError::RoleElevation)
        );
    }

    #[test]
    fn admin_cannot_delete_another_admin() {
        let admin = admin();
        let target = UserTarget {
            user_id: UserId::new(),
            role: Role::Admin,
            tenant_id: admin.tenant_id().unwrap(),
        };
        assert!(matches!(
            authorize_user_change(&admin, Action::Delete, &target),
            Err(AuthzError::Forbidden { .. })
        ));
    }

    #[test]
    fn admin_cannot_touch_users_of_another_tenant() {
        let admin = admin();
        let target = UserTarget {
            user_id: UserId::new(),
            role: Role::User,
            tenant_id: TenantId::new(),
        };
        assert_eq!(
            authorize_user_change(&admin, Action::Delete, &target),
            Err(AuthzError::TenantMismatch)
        );
    }

    #[test]
    fn super_admin_may_delete_an_admin_in_any_tenant() {
        let sa = Identity::super_admin(UserId::new());
        let target = UserTarget {
            user_id: UserId::new(),
            role: Role::Admin,
            tenant_id: TenantId::new(),
        };
        assert!(authorize_user_change(&sa, Action::Delete, &target).is_ok());
    }
}
