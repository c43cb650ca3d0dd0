//! Tenant resolution and the membership gate.
//!
//! Generic over repository implementations so the gate can be exercised
//! against an in-memory fake as easily as against the real store. The
//! gate is idempotent and side-effect-free: calling it twice in one
//! request (layout, then route) yields consistent results.

use sealbox_core::models::organization::{Organization, RESERVED_DEMO_SLUG};
use sealbox_core::repository::{MembershipRepository, OrganizationRepository};
use uuid::Uuid;

use crate::error::TenantAccessError;

/// The single chokepoint converting `(slug, caller)` into an authorized
/// organization or a typed rejection.
pub struct TenantGate<O, M> {
    organizations: O,
    memberships: M,
}

impl<O, M> TenantGate<O, M>
where
    O: OrganizationRepository,
    M: MembershipRepository,
{
    pub fn new(organizations: O, memberships: M) -> Self {
        Self {
            organizations,
            memberships,
        }
    }

    /// Exact-match lookup by slug, independent of any caller.
    ///
    /// Absence is an expected, recoverable outcome (`Ok(None)`), so
    /// callers can decide between a not-found page and a redirect.
    pub async fn resolve_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Organization>, TenantAccessError> {
        Ok(self.organizations.find_by_slug(slug).await?)
    }

    /// Resolve a slug and verify the caller's membership.
    ///
    /// `NotFound` when the slug resolves to nothing; `Forbidden` when
    /// the organization exists but the caller is not a member.
    pub async fn require_tenant(
        &self,
        slug: &str,
        user_id: Uuid,
    ) -> Result<Organization, TenantAccessError> {
        let Some(organization) = self.organizations.find_by_slug(slug).await? else {
            return Err(TenantAccessError::NotFound { slug: slug.into() });
        };

        if self
            .memberships
            .find(user_id, organization.id)
            .await?
            .is_none()
        {
            tracing::warn!(%user_id, slug, "tenant access denied: no membership");
            return Err(TenantAccessError::Forbidden { slug: slug.into() });
        }

        Ok(organization)
    }

    /// The only sanctioned way for a handler to obtain a tenant id for
    /// downstream scoped queries.
    pub async fn tenant_id_for(
        &self,
        slug: &str,
        user_id: Uuid,
    ) -> Result<Uuid, TenantAccessError> {
        Ok(self.require_tenant(slug, user_id).await?.id)
    }
}

/// Reject mutation of the reserved demo organization.
///
/// Checked in addition to (never instead of) the membership check, on
/// every mutating operation against provider keys and workspace
/// configuration.
pub fn assert_not_locked(organization: &Organization) -> Result<(), TenantAccessError> {
    if organization.slug == RESERVED_DEMO_SLUG {
        return Err(TenantAccessError::Locked);
    }
    Ok(())
}
