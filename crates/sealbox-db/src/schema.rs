//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation. Every uniqueness invariant the
//! services rely on (slug, email, membership pair, provider-key pair)
//! is enforced here with a UNIQUE index so concurrent writers resolve
//! atomically in the store.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Organizations (the unit of tenancy)
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL;
DEFINE FIELD name ON TABLE organization TYPE string;
DEFINE FIELD slug ON TABLE organization TYPE string;
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_organization_slug ON TABLE organization \
    COLUMNS slug UNIQUE;

-- =======================================================================
-- Users (global scope)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE option<string>;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Memberships (user <-> organization)
-- =======================================================================
DEFINE TABLE membership SCHEMAFULL;
DEFINE FIELD user_id ON TABLE membership TYPE string;
DEFINE FIELD organization_id ON TABLE membership TYPE string;
DEFINE FIELD role ON TABLE membership TYPE string \
    ASSERT $value IN ['OWNER', 'MEMBER'];
DEFINE FIELD created_at ON TABLE membership TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_membership_user_org ON TABLE membership \
    COLUMNS user_id, organization_id UNIQUE;

-- =======================================================================
-- Provider keys (organization scope, ciphertext only)
-- =======================================================================
DEFINE TABLE provider_key SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE provider_key TYPE string;
DEFINE FIELD provider ON TABLE provider_key TYPE string \
    ASSERT $value IN ['OPENAI', 'ANTHROPIC', 'GEMINI'];
DEFINE FIELD encrypted_key ON TABLE provider_key TYPE string;
DEFINE FIELD created_at ON TABLE provider_key TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE provider_key TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_provider_key_org_provider ON TABLE provider_key \
    COLUMNS organization_id, provider UNIQUE;

-- =======================================================================
-- Workspace configuration (organization scope)
-- =======================================================================
DEFINE TABLE tenant_config SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE tenant_config TYPE string;
DEFINE FIELD use_case ON TABLE tenant_config TYPE option<string>;
DEFINE FIELD tone ON TABLE tenant_config TYPE option<string>;
DEFINE FIELD provider_order ON TABLE tenant_config TYPE array<string> \
    DEFAULT ['OPENAI', 'ANTHROPIC', 'GEMINI'];
DEFINE FIELD allow_ollama_fallback ON TABLE tenant_config TYPE bool \
    DEFAULT false;
DEFINE FIELD branding ON TABLE tenant_config TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD created_at ON TABLE tenant_config TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE tenant_config TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_tenant_config_org ON TABLE tenant_config \
    COLUMNS organization_id UNIQUE;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}
