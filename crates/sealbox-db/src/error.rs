//! Database-specific error types and conversions.

use sealbox_core::error::SealboxError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Corrupt row: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for SealboxError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => SealboxError::NotFound { entity, id },
            other => SealboxError::Database(other.to_string()),
        }
    }
}
