//! Membership domain model.
//!
//! A membership binds a user to an organization. Authorization in
//! Sealbox is existence-based: holding any membership row grants access
//! to the organization's workspace. The role is stored for future
//! tiering but not enforced beyond existence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipRole {
    #[serde(rename = "OWNER")]
    Owner,
    #[serde(rename = "MEMBER")]
    Member,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Owner => "OWNER",
            MembershipRole::Member => "MEMBER",
        }
    }
}

/// At most one membership row exists per `(user_id, organization_id)`
/// pair; the store enforces this with a unique index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub role: MembershipRole,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a new membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub role: MembershipRole,
}
