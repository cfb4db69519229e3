//! Enumerated per-resource capabilities for `Role::User`.
//!
//! The source system stored ad hoc per-module read/write flags as opaque
//! JSON on the user record. Here the module list is a closed enum and every
//! grant is validated against it at construction, so an unknown module name
//! cannot exist past the deserialization boundary.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::guard::AuthzError;

/// Business resource kinds a capability can be granted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Customer,
    Service,
    Project,
    Invoice,
    CashFlow,
    Event,
    User,
    Tenant,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Customer => "customer",
            ResourceKind::Service => "service",
            ResourceKind::Project => "project",
            ResourceKind::Invoice => "invoice",
            ResourceKind::CashFlow => "cash_flow",
            ResourceKind::Event => "event",
            ResourceKind::User => "user",
            ResourceKind::Tenant => "tenant",
        }
    }

    /// Kinds a per-user capability may be granted for. User and tenant
    /// administration are role-gated, never capability-gated.
    pub fn grantable(&self) -> bool {
        !matches!(self, ResourceKind::User | ResourceKind::Tenant)
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access level of a capability grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Read,
    Write,
}

/// A single `(resource, access)` grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub resource: ResourceKind,
    pub access: Access,
}

impl Capability {
    pub fn read(resource: ResourceKind) -> Self {
        Self {
            resource,
            access: Access::Read,
        }
    }

    pub fn write(resource: ResourceKind) -> Self {
        Self {
            resource,
            access: Access::Write,
        }
    }
}

/// The validated set of grants carried by a `Role::User` identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(HashSet<Capability>);

impl CapabilitySet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from grants, rejecting non-grantable resource kinds.
    pub fn from_grants(grants: impl IntoIterator<Item = Capability>) -> Result<Self, AuthzError> {
        let mut set = HashSet::new();
        for grant in grants {
            if !grant.resource.grantable() {
                return Err(AuthzError::InvalidGrant(grant.resource));
            }
            set.insert(grant);
        }
        Ok(Self(set))
    }

    /// Whether the set allows `access` on `resource`.
    ///
    /// Write implies read: a write grant covers read requests on the same
    /// resource kind.
    pub fn allows(&self, resource: ResourceKind, access: Access) -> bool {
        if self.0.contains(&Capability { resource, access }) {
            return true;
        }
        access == Access::Read && self.0.contains(&Capability::write(resource))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
