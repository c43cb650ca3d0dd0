//! SurrealDB implementation of [`TenantConfigRepository`].
//!
//! Workspace configuration is one row per organization, addressed by a
//! deterministic record id (the organization UUID).

use chrono::{DateTime, Utc};
use sealbox_core::error::SealboxResult;
use sealbox_core::models::provider::Provider;
use sealbox_core::models::tenant_config::{TenantConfig, UpdateTenantConfig};
use sealbox_core::repository::TenantConfigRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct TenantConfigRow {
    organization_id: String,
    use_case: Option<String>,
    tone: Option<String>,
    provider_order: Vec<String>,
    allow_ollama_fallback: bool,
    branding: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TenantConfigRow {
    fn try_into_config(self) -> Result<TenantConfig, DbError> {
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid org UUID: {e}")))?;
        let provider_order = self
            .provider_order
            .iter()
            .map(|p| {
                Provider::parse(p)
                    .ok_or_else(|| DbError::Decode(format!("unknown provider: {p}")))
            })
            .collect::<Result<Vec<_>, DbError>>()?;
        Ok(TenantConfig {
            organization_id,
            use_case: self.use_case,
            tone: self.tone,
            provider_order,
            allow_ollama_fallback: self.allow_ollama_fallback,
            branding: self.branding,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the TenantConfig repository.
#[derive(Clone)]
pub struct SurrealTenantConfigRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantConfigRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TenantConfigRepository for SurrealTenantConfigRepository<C> {
    async fn find(&self, organization_id: Uuid) -> SealboxResult<Option<TenantConfig>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('tenant_config', $id)")
            .bind(("id", organization_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantConfigRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_config()?)),
            None => Ok(None),
        }
    }

    async fn ensure_default(&self, organization_id: Uuid) -> SealboxResult<TenantConfig> {
        if let Some(existing) = self.find(organization_id).await? {
            return Ok(existing);
        }

        let id_str = organization_id.to_string();
        let result = self
            .db
            .query(
                // Field DEFAULTs fill provider_order, fallback flag,
                // and branding on creation.
                "CREATE type::record('tenant_config', $id) SET \
                 organization_id = $organization_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<TenantConfigRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant_config".into(),
            id: id_str,
        })?;

        Ok(row.try_into_config()?)
    }

    async fn update(
        &self,
        organization_id: Uuid,
        input: UpdateTenantConfig,
    ) -> SealboxResult<TenantConfig> {
        let id_str = organization_id.to_string();

        let mut sets = Vec::new();
        if input.use_case.is_some() {
            sets.push("use_case = $use_case");
        }
        if input.tone.is_some() {
            sets.push("tone = $tone");
        }
        if input.provider_order.is_some() {
            sets.push("provider_order = $provider_order");
        }
        if input.allow_ollama_fallback.is_some() {
            sets.push("allow_ollama_fallback = $allow_ollama_fallback");
        }
        if input.branding.is_some() {
            sets.push("branding = $branding");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('tenant_config', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(use_case) = input.use_case {
            builder = builder.bind(("use_case", use_case));
        }
        if let Some(tone) = input.tone {
            builder = builder.bind(("tone", tone));
        }
        if let Some(provider_order) = input.provider_order {
            let order: Vec<String> = provider_order
                .into_iter()
                .map(|p| p.as_str().to_string())
                .collect();
            builder = builder.bind(("provider_order", order));
        }
        if let Some(allow) = input.allow_ollama_fallback {
            builder = builder.bind(("allow_ollama_fallback", allow));
        }
        if let Some(branding) = input.branding {
            builder = builder.bind(("branding", branding));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<TenantConfigRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant_config".into(),
            id: id_str,
        })?;

        Ok(row.try_into_config()?)
    }
}
