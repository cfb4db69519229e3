//! User account record, as stored per tenant.

use serde::{Deserialize, Serialize};

use atrium_core::{TenantId, UserId};

use crate::guard::UserTarget;
use crate::identity::Role;

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Deactivated,
}

/// A user account within a tenant.
///
/// `tenant_id` is assigned at creation and immutable thereafter, like every
/// other tenant-scoped record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub role: Role,
    pub name: String,
    pub status: UserStatus,
}

impl UserAccount {
    pub fn new(tenant_id: TenantId, role: Role, name: impl Into<String>) -> Self {
        Self {
            user_id: UserId::new(),
            tenant_id,
            role,
            name: name.into(),
            status: UserStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// View of this account as a guard target.
    pub fn as_target(&self) -> UserTarget {
        UserTarget {
            user_id: self.user_id,
            role: self.role,
            tenant_id: self.tenant_id,
        }
    }
}
