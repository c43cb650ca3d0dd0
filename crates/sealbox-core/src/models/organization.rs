//! Organization domain model.
//!
//! An organization is the unit of tenancy: it owns its workspace
//! configuration and its provider keys, and is addressed publicly by a
//! URL-safe slug that is unique across the whole system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slug of the shared read-only demo workspace.
///
/// The demo organization is readable by anyone signed in as its fixed
/// demo user, but its secrets and configuration are never mutable.
pub const RESERVED_DEMO_SLUG: &str = "demo";

/// An isolated tenant workspace.
///
/// `id` is generated at creation and never changes; `name` and `slug`
/// are mutable through the onboarding flow. Slug uniqueness is enforced
/// by the store at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// URL-safe unique identifier (e.g., `acme-corp`).
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
}

/// Fields that can be updated on an existing organization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// Normalize a user-supplied slug for write time.
///
/// Lowercases, maps whitespace runs to single dashes, drops everything
/// outside `[a-z0-9-]`, and trims leading/trailing dashes. Returns
/// `None` when nothing usable survives.
pub fn normalize_slug(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut last_dash = true;
    for ch in raw.trim().to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_dash = false;
        } else if (ch == '-' || ch.is_whitespace()) && !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() { None } else { Some(out) }
}
