//! Idempotent demo fixtures.
//!
//! Provisions the shared read-only demo workspace: a fixed demo user,
//! the `demo` organization, an OWNER membership, and a default
//! workspace configuration. Safe to run on every startup.

use sealbox_core::error::SealboxResult;
use sealbox_core::models::membership::{CreateMembership, MembershipRole};
use sealbox_core::models::organization::{CreateOrganization, RESERVED_DEMO_SLUG};
use sealbox_core::models::user::CreateUser;
use sealbox_core::repository::{
    MembershipRepository, OrganizationRepository, TenantConfigRepository, UserRepository,
};
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::repository::{
    SurrealMembershipRepository, SurrealOrganizationRepository, SurrealTenantConfigRepository,
    SurrealUserRepository,
};

/// Fixed credentials for the shared demo account.
pub const DEMO_EMAIL: &str = "demo@sealbox.dev";
const DEMO_PASSWORD: &str = "demo-password";

/// Create the demo user, organization, membership, and default config
/// if any of them are missing.
pub async fn seed_demo<C: Connection>(db: &Surreal<C>) -> SealboxResult<()> {
    let users = SurrealUserRepository::new(db.clone());
    let organizations = SurrealOrganizationRepository::new(db.clone());
    let memberships = SurrealMembershipRepository::new(db.clone());
    let configs = SurrealTenantConfigRepository::new(db.clone());

    let user = match users.find_by_email(DEMO_EMAIL).await? {
        Some(user) => user,
        None => {
            let password_hash = sealbox_auth::password::hash_password(DEMO_PASSWORD, None)?;
            users
                .create(CreateUser {
                    email: DEMO_EMAIL.into(),
                    name: Some("Demo User".into()),
                    password_hash,
                })
                .await?
        }
    };

    let organization = match organizations.find_by_slug(RESERVED_DEMO_SLUG).await? {
        Some(organization) => organization,
        None => {
            organizations
                .create(CreateOrganization {
                    name: "Demo Workspace".into(),
                    slug: RESERVED_DEMO_SLUG.into(),
                })
                .await?
        }
    };

    if memberships.find(user.id, organization.id).await?.is_none() {
        memberships
            .create(CreateMembership {
                user_id: user.id,
                organization_id: organization.id,
                role: MembershipRole::Owner,
            })
            .await?;
    }

    configs.ensure_default(organization.id).await?;

    info!(organization_id = %organization.id, "demo workspace seeded");
    Ok(())
}
