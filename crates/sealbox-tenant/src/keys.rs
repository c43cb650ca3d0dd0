//! Provider-key storage: gate, lock check, encrypt, upsert.
//!
//! Plaintext keys are write-only: they are encrypted here and never
//! handed back out through any operation in the system.

use sealbox_core::error::SealboxError;
use sealbox_core::models::provider::Provider;
use sealbox_core::models::provider_key::UpsertProviderKey;
use sealbox_core::repository::{
    MembershipRepository, OrganizationRepository, ProviderKeyRepository,
};
use sealbox_crypto::SecretCipher;
use uuid::Uuid;

use crate::error::TenantAccessError;
use crate::gate::{TenantGate, assert_not_locked};

/// Tenant-scoped provider-key operations.
pub struct ProviderKeyService<O, M, K> {
    gate: TenantGate<O, M>,
    keys: K,
    cipher: SecretCipher,
}

impl<O, M, K> ProviderKeyService<O, M, K>
where
    O: OrganizationRepository,
    M: MembershipRepository,
    K: ProviderKeyRepository,
{
    pub fn new(gate: TenantGate<O, M>, keys: K, cipher: SecretCipher) -> Self {
        Self { gate, keys, cipher }
    }

    /// Encrypt and store a vendor key for the caller's organization.
    ///
    /// Membership gate first, demo lock second, then encrypt-and-upsert:
    /// a second save for the same `(organization, provider)` overwrites.
    pub async fn save_key(
        &self,
        slug: &str,
        user_id: Uuid,
        provider: Provider,
        plaintext_key: &str,
    ) -> Result<(), TenantAccessError> {
        let organization = self.gate.require_tenant(slug, user_id).await?;
        assert_not_locked(&organization)?;

        let encrypted_key = self
            .cipher
            .encrypt(plaintext_key)
            .map_err(SealboxError::from)?;

        self.keys
            .upsert(UpsertProviderKey {
                organization_id: organization.id,
                provider,
                encrypted_key,
            })
            .await?;

        tracing::info!(
            organization_id = %organization.id,
            provider = provider.as_str(),
            "provider key stored"
        );
        Ok(())
    }

    /// Which providers have a stored key. Key material is never listed.
    pub async fn configured_providers(
        &self,
        slug: &str,
        user_id: Uuid,
    ) -> Result<Vec<Provider>, TenantAccessError> {
        let organization = self.gate.require_tenant(slug, user_id).await?;
        Ok(self.keys.configured_providers(organization.id).await?)
    }
}
