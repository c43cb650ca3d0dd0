//! SurrealDB implementation of [`ProviderKeyRepository`].
//!
//! Provider keys use a deterministic record id derived from
//! `(organization_id, provider)`, so a save is a single UPSERT: two
//! concurrent writers for the same pair resolve to last-writer-wins,
//! never to duplicate rows. The unique index on the pair backs the same
//! invariant at the schema level.

use chrono::{DateTime, Utc};
use sealbox_core::error::SealboxResult;
use sealbox_core::models::provider::Provider;
use sealbox_core::models::provider_key::{ProviderKey, UpsertProviderKey};
use sealbox_core::repository::ProviderKeyRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ProviderKeyRow {
    organization_id: String,
    provider: String,
    encrypted_key: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProviderKeyRow {
    fn try_into_provider_key(self) -> Result<ProviderKey, DbError> {
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid org UUID: {e}")))?;
        let provider = Provider::parse(&self.provider)
            .ok_or_else(|| DbError::Decode(format!("unknown provider: {}", self.provider)))?;
        Ok(ProviderKey {
            organization_id,
            provider,
            encrypted_key: self.encrypted_key,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for provider-name projections.
#[derive(Debug, SurrealValue)]
struct ProviderNameRow {
    provider: String,
}

/// Deterministic record id for a `(organization, provider)` pair.
fn record_id(organization_id: Uuid, provider: Provider) -> String {
    format!("{organization_id}_{}", provider.as_str())
}

/// SurrealDB implementation of the ProviderKey repository.
#[derive(Clone)]
pub struct SurrealProviderKeyRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProviderKeyRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ProviderKeyRepository for SurrealProviderKeyRepository<C> {
    async fn upsert(&self, input: UpsertProviderKey) -> SealboxResult<ProviderKey> {
        let id = record_id(input.organization_id, input.provider);

        let result = self
            .db
            .query(
                "UPSERT type::record('provider_key', $id) SET \
                 organization_id = $organization_id, \
                 provider = $provider, \
                 encrypted_key = $encrypted_key, \
                 updated_at = time::now()",
            )
            .bind(("id", id.clone()))
            .bind(("organization_id", input.organization_id.to_string()))
            .bind(("provider", input.provider.as_str()))
            .bind(("encrypted_key", input.encrypted_key))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ProviderKeyRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "provider_key".into(),
            id,
        })?;

        Ok(row.try_into_provider_key()?)
    }

    async fn find(
        &self,
        organization_id: Uuid,
        provider: Provider,
    ) -> SealboxResult<Option<ProviderKey>> {
        let id = record_id(organization_id, provider);

        let mut result = self
            .db
            .query("SELECT * FROM type::record('provider_key', $id)")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProviderKeyRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_provider_key()?)),
            None => Ok(None),
        }
    }

    async fn configured_providers(&self, organization_id: Uuid) -> SealboxResult<Vec<Provider>> {
        let mut result = self
            .db
            .query(
                "SELECT provider FROM provider_key \
                 WHERE organization_id = $organization_id \
                 ORDER BY provider ASC",
            )
            .bind(("organization_id", organization_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProviderNameRow> = result.take(0).map_err(DbError::from)?;
        let providers = rows
            .into_iter()
            .map(|row| {
                Provider::parse(&row.provider)
                    .ok_or_else(|| DbError::Decode(format!("unknown provider: {}", row.provider)))
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(providers)
    }
}
