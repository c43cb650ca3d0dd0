//! Workspace configuration captured by the onboarding flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::provider::Provider;

/// Per-organization workspace configuration. One row per organization,
/// created with defaults on the first onboarding write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub organization_id: Uuid,
    pub use_case: Option<String>,
    pub tone: Option<String>,
    /// Preferred provider fallback order.
    pub provider_order: Vec<Provider>,
    pub allow_ollama_fallback: bool,
    /// Free-form branding blob (logo URL, primary color, …).
    pub branding: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateTenantConfig {
    pub use_case: Option<String>,
    pub tone: Option<String>,
    pub provider_order: Option<Vec<Provider>>,
    pub allow_ollama_fallback: Option<bool>,
    pub branding: Option<serde_json::Value>,
}

impl UpdateTenantConfig {
    /// Whether applying this update would change anything.
    pub fn is_empty(&self) -> bool {
        self.use_case.is_none()
            && self.tone.is_none()
            && self.provider_order.is_none()
            && self.allow_ollama_fallback.is_none()
            && self.branding.is_none()
    }
}
