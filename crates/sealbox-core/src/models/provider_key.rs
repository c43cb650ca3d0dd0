//! Provider-key domain model.
//!
//! The stored value is an opaque ciphertext token produced by the
//! secret codec. Nothing outside `sealbox-crypto` can interpret it, and
//! no operation in the system hands decrypted key material back to a
//! caller. Keys are write-only from the API's perspective.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::provider::Provider;

/// One encrypted vendor credential, scoped to one organization.
///
/// At most one row exists per `(organization_id, provider)`; a second
/// save overwrites via upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderKey {
    pub organization_id: Uuid,
    pub provider: Provider,
    /// Opaque codec output: `base64url(nonce || tag || ciphertext)`.
    pub encrypted_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for the create-or-overwrite write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertProviderKey {
    pub organization_id: Uuid,
    pub provider: Provider,
    pub encrypted_key: String,
}
