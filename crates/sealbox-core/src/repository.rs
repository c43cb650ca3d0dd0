//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups whose absence is an
//! expected, recoverable outcome (slug resolution, membership checks,
//! key presence) return `Option` rather than an error, so callers can
//! distinguish "not there" from "store failed".

use uuid::Uuid;

use crate::error::SealboxResult;
use crate::models::{
    membership::{CreateMembership, Membership},
    organization::{CreateOrganization, Organization, UpdateOrganization},
    provider::Provider,
    provider_key::{ProviderKey, UpsertProviderKey},
    tenant_config::{TenantConfig, UpdateTenantConfig},
    user::{CreateUser, User},
};

pub trait OrganizationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = SealboxResult<Organization>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SealboxResult<Organization>> + Send;
    /// Exact-match lookup on the unique slug index.
    fn find_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = SealboxResult<Option<Organization>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateOrganization,
    ) -> impl Future<Output = SealboxResult<Organization>> + Send;
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = SealboxResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SealboxResult<User>> + Send;
    /// `email` must already be case-folded.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = SealboxResult<Option<User>>> + Send;
}

pub trait MembershipRepository: Send + Sync {
    fn create(
        &self,
        input: CreateMembership,
    ) -> impl Future<Output = SealboxResult<Membership>> + Send;
    /// The authorization primitive: does this user belong to this
    /// organization?
    fn find(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> impl Future<Output = SealboxResult<Option<Membership>>> + Send;
    /// All memberships held by a user (workspace switcher).
    fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = SealboxResult<Vec<Membership>>> + Send;
}

pub trait ProviderKeyRepository: Send + Sync {
    /// Create-or-overwrite on `(organization_id, provider)`; last
    /// writer wins.
    fn upsert(
        &self,
        input: UpsertProviderKey,
    ) -> impl Future<Output = SealboxResult<ProviderKey>> + Send;
    fn find(
        &self,
        organization_id: Uuid,
        provider: Provider,
    ) -> impl Future<Output = SealboxResult<Option<ProviderKey>>> + Send;
    /// Which providers have a stored key. Key material is never listed.
    fn configured_providers(
        &self,
        organization_id: Uuid,
    ) -> impl Future<Output = SealboxResult<Vec<Provider>>> + Send;
}

pub trait TenantConfigRepository: Send + Sync {
    fn find(
        &self,
        organization_id: Uuid,
    ) -> impl Future<Output = SealboxResult<Option<TenantConfig>>> + Send;
    /// Create the row with defaults if absent; return the existing row
    /// otherwise.
    fn ensure_default(
        &self,
        organization_id: Uuid,
    ) -> impl Future<Output = SealboxResult<TenantConfig>> + Send;
    fn update(
        &self,
        organization_id: Uuid,
        input: UpdateTenantConfig,
    ) -> impl Future<Output = SealboxResult<TenantConfig>> + Send;
}
