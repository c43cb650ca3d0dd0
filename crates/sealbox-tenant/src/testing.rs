//! In-memory fake repositories for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use sealbox_core::error::{SealboxError, SealboxResult};
use sealbox_core::models::membership::{CreateMembership, Membership, MembershipRole};
use sealbox_core::models::organization::{CreateOrganization, Organization, UpdateOrganization};
use sealbox_core::models::provider::Provider;
use sealbox_core::models::provider_key::{ProviderKey, UpsertProviderKey};
use sealbox_core::models::tenant_config::{TenantConfig, UpdateTenantConfig};
use sealbox_core::repository::{
    MembershipRepository, OrganizationRepository, ProviderKeyRepository, TenantConfigRepository,
};
use uuid::Uuid;

/// Build an organization fixture with a fresh id.
pub fn organization(slug: &str) -> Organization {
    let now = Utc::now();
    Organization {
        id: Uuid::new_v4(),
        name: format!("Org {slug}"),
        slug: slug.into(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Clone, Default)]
pub struct FakeOrganizations {
    rows: Arc<Mutex<HashMap<Uuid, Organization>>>,
}

impl FakeOrganizations {
    pub fn with(organizations: Vec<Organization>) -> Self {
        let rows = organizations.into_iter().map(|o| (o.id, o)).collect();
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }
}

impl OrganizationRepository for FakeOrganizations {
    async fn create(&self, input: CreateOrganization) -> SealboxResult<Organization> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|o| o.slug == input.slug) {
            return Err(SealboxError::AlreadyExists {
                entity: "organization".into(),
            });
        }
        let now = Utc::now();
        let org = Organization {
            id: Uuid::new_v4(),
            name: input.name,
            slug: input.slug,
            created_at: now,
            updated_at: now,
        };
        rows.insert(org.id, org.clone());
        Ok(org)
    }

    async fn get_by_id(&self, id: Uuid) -> SealboxResult<Organization> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| SealboxError::NotFound {
                entity: "organization".into(),
                id: id.to_string(),
            })
    }

    async fn find_by_slug(&self, slug: &str) -> SealboxResult<Option<Organization>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|o| o.slug == slug)
            .cloned())
    }

    async fn update(&self, id: Uuid, input: UpdateOrganization) -> SealboxResult<Organization> {
        let mut rows = self.rows.lock().unwrap();
        let org = rows.get_mut(&id).ok_or_else(|| SealboxError::NotFound {
            entity: "organization".into(),
            id: id.to_string(),
        })?;
        if let Some(name) = input.name {
            org.name = name;
        }
        if let Some(slug) = input.slug {
            org.slug = slug;
        }
        org.updated_at = Utc::now();
        Ok(org.clone())
    }
}

#[derive(Clone, Default)]
pub struct FakeMemberships {
    rows: Arc<Mutex<Vec<Membership>>>,
}

impl FakeMemberships {
    /// OWNER memberships for each `(user, organization)` pair.
    pub fn with(pairs: Vec<(Uuid, Uuid)>) -> Self {
        let rows = pairs
            .into_iter()
            .map(|(user_id, organization_id)| Membership {
                user_id,
                organization_id,
                role: MembershipRole::Owner,
                created_at: Utc::now(),
            })
            .collect();
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }
}

impl MembershipRepository for FakeMemberships {
    async fn create(&self, input: CreateMembership) -> SealboxResult<Membership> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|m| m.user_id == input.user_id && m.organization_id == input.organization_id)
        {
            return Err(SealboxError::AlreadyExists {
                entity: "membership".into(),
            });
        }
        let membership = Membership {
            user_id: input.user_id,
            organization_id: input.organization_id,
            role: input.role,
            created_at: Utc::now(),
        };
        rows.push(membership.clone());
        Ok(membership)
    }

    async fn find(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> SealboxResult<Option<Membership>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.user_id == user_id && m.organization_id == organization_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> SealboxResult<Vec<Membership>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct FakeProviderKeys {
    rows: Arc<Mutex<HashMap<(Uuid, Provider), ProviderKey>>>,
}

impl ProviderKeyRepository for FakeProviderKeys {
    async fn upsert(&self, input: UpsertProviderKey) -> SealboxResult<ProviderKey> {
        let now = Utc::now();
        let key = ProviderKey {
            organization_id: input.organization_id,
            provider: input.provider,
            encrypted_key: input.encrypted_key,
            created_at: now,
            updated_at: now,
        };
        self.rows
            .lock()
            .unwrap()
            .insert((input.organization_id, input.provider), key.clone());
        Ok(key)
    }

    async fn find(
        &self,
        organization_id: Uuid,
        provider: Provider,
    ) -> SealboxResult<Option<ProviderKey>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&(organization_id, provider))
            .cloned())
    }

    async fn configured_providers(&self, organization_id: Uuid) -> SealboxResult<Vec<Provider>> {
        let mut providers: Vec<Provider> = self
            .rows
            .lock()
            .unwrap()
            .keys()
            .filter(|(org, _)| *org == organization_id)
            .map(|(_, provider)| *provider)
            .collect();
        providers.sort_by_key(|p| p.as_str());
        Ok(providers)
    }
}

#[derive(Clone, Default)]
pub struct FakeTenantConfigs {
    rows: Arc<Mutex<HashMap<Uuid, TenantConfig>>>,
}

impl FakeTenantConfigs {
    fn default_config(organization_id: Uuid) -> TenantConfig {
        let now = Utc::now();
        TenantConfig {
            organization_id,
            use_case: None,
            tone: None,
            provider_order: Provider::ALL.to_vec(),
            allow_ollama_fallback: false,
            branding: serde_json::Value::Object(Default::default()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl TenantConfigRepository for FakeTenantConfigs {
    async fn find(&self, organization_id: Uuid) -> SealboxResult<Option<TenantConfig>> {
        Ok(self.rows.lock().unwrap().get(&organization_id).cloned())
    }

    async fn ensure_default(&self, organization_id: Uuid) -> SealboxResult<TenantConfig> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .entry(organization_id)
            .or_insert_with(|| Self::default_config(organization_id))
            .clone())
    }

    async fn update(
        &self,
        organization_id: Uuid,
        input: UpdateTenantConfig,
    ) -> SealboxResult<TenantConfig> {
        let mut rows = self.rows.lock().unwrap();
        let config = rows
            .get_mut(&organization_id)
            .ok_or_else(|| SealboxError::NotFound {
                entity: "tenant_config".into(),
                id: organization_id.to_string(),
            })?;
        if let Some(use_case) = input.use_case {
            config.use_case = Some(use_case);
        }
        if let Some(tone) = input.tone {
            config.tone = Some(tone);
        }
        if let Some(order) = input.provider_order {
            config.provider_order = order;
        }
        if let Some(allow) = input.allow_ollama_fallback {
            config.allow_ollama_fallback = allow;
        }
        if let Some(branding) = input.branding {
            config.branding = branding;
        }
        config.updated_at = Utc::now();
        Ok(config.clone())
    }
}
