//! Request contexts stored in axum extensions.

use atrium_auth::Identity;

/// Verified caller identity for a request.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext(Identity);

impl IdentityContext {
    pub fn new(identity: Identity) -> Self {
        Self(identity)
    }

    pub fn identity(&self) -> &Identity {
        &self.0
    }
}
