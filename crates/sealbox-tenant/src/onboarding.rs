//! Workspace onboarding: rename, slug change, configuration, keys.
//!
//! One entry point applies a partial onboarding step. Every call goes
//! through the membership gate and the demo lock before touching
//! anything, and slug changes are normalized and uniqueness-checked at
//! write time.

use sealbox_core::error::SealboxError;
use sealbox_core::models::organization::{UpdateOrganization, normalize_slug};
use sealbox_core::models::provider::Provider;
use sealbox_core::models::provider_key::UpsertProviderKey;
use sealbox_core::models::tenant_config::{TenantConfig, UpdateTenantConfig};
use sealbox_core::repository::{
    MembershipRepository, OrganizationRepository, ProviderKeyRepository, TenantConfigRepository,
};
use sealbox_crypto::SecretCipher;
use uuid::Uuid;

use crate::error::TenantAccessError;
use crate::gate::{TenantGate, assert_not_locked};

/// One step of the onboarding wizard; all fields optional.
#[derive(Debug, Default)]
pub struct OnboardingUpdate {
    pub organization_name: Option<String>,
    pub slug: Option<String>,
    pub config: UpdateTenantConfig,
    /// Plaintext vendor keys to encrypt and store.
    pub provider_keys: Vec<(Provider, String)>,
}

/// Applies onboarding steps to the caller's workspace.
pub struct OnboardingService<O, M, C, K> {
    organizations: O,
    gate: TenantGate<O, M>,
    configs: C,
    keys: K,
    cipher: SecretCipher,
}

impl<O, M, C, K> OnboardingService<O, M, C, K>
where
    O: OrganizationRepository + Clone,
    M: MembershipRepository,
    C: TenantConfigRepository,
    K: ProviderKeyRepository,
{
    pub fn new(organizations: O, memberships: M, configs: C, keys: K, cipher: SecretCipher) -> Self {
        Self {
            gate: TenantGate::new(organizations.clone(), memberships),
            organizations,
            configs,
            keys,
            cipher,
        }
    }

    /// Apply one onboarding step and return the resulting configuration.
    pub async fn apply(
        &self,
        slug: &str,
        user_id: Uuid,
        update: OnboardingUpdate,
    ) -> Result<TenantConfig, TenantAccessError> {
        let organization = self.gate.require_tenant(slug, user_id).await?;
        assert_not_locked(&organization)?;

        if let Some(name) = update.organization_name {
            let name = name.trim().to_string();
            if !name.is_empty() {
                self.organizations
                    .update(
                        organization.id,
                        UpdateOrganization {
                            name: Some(name),
                            ..Default::default()
                        },
                    )
                    .await?;
            }
        }

        if let Some(requested) = update.slug {
            let Some(new_slug) = normalize_slug(&requested) else {
                return Err(SealboxError::Validation {
                    message: format!("'{requested}' is not a usable slug"),
                }
                .into());
            };
            if new_slug != organization.slug {
                if self.organizations.find_by_slug(&new_slug).await?.is_some() {
                    return Err(SealboxError::Validation {
                        message: format!("slug '{new_slug}' is already taken"),
                    }
                    .into());
                }
                self.organizations
                    .update(
                        organization.id,
                        UpdateOrganization {
                            slug: Some(new_slug.clone()),
                            ..Default::default()
                        },
                    )
                    .await?;
                tracing::info!(organization_id = %organization.id, new_slug, "slug changed");
            }
        }

        // The config row exists from the first onboarding touch onward.
        let mut config = self.configs.ensure_default(organization.id).await?;
        if !update.config.is_empty() {
            config = self.configs.update(organization.id, update.config).await?;
        }

        for (provider, plaintext_key) in update.provider_keys {
            if plaintext_key.is_empty() {
                continue;
            }
            let encrypted_key = self
                .cipher
                .encrypt(&plaintext_key)
                .map_err(SealboxError::from)?;
            self.keys
                .upsert(UpsertProviderKey {
                    organization_id: organization.id,
                    provider,
                    encrypted_key,
                })
                .await?;
        }

        Ok(config)
    }
}
