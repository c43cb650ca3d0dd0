//! Signup and credential verification.
//!
//! Generic over repository implementations so the auth layer has no
//! dependency on the database crate.

use sealbox_core::error::{SealboxError, SealboxResult};
use sealbox_core::models::membership::{CreateMembership, MembershipRole};
use sealbox_core::models::organization::CreateOrganization;
use sealbox_core::models::user::{CreateUser, User};
use sealbox_core::repository::{MembershipRepository, OrganizationRepository, UserRepository};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;

/// Input for the signup flow.
#[derive(Debug)]
pub struct SignupInput {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

/// Successful signup result.
#[derive(Debug)]
pub struct SignupOutput {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    /// Slug of the freshly created workspace.
    pub slug: String,
}

/// Signup/signin service.
pub struct SignupService<U, O, M> {
    users: U,
    organizations: O,
    memberships: M,
    config: AuthConfig,
}

impl<U, O, M> SignupService<U, O, M>
where
    U: UserRepository,
    O: OrganizationRepository,
    M: MembershipRepository,
{
    pub fn new(users: U, organizations: O, memberships: M, config: AuthConfig) -> Self {
        Self {
            users,
            organizations,
            memberships,
            config,
        }
    }

    /// Register a new account and provision its workspace.
    ///
    /// Creates the user, an organization with a slug derived from the
    /// email local part, and the OWNER membership binding them.
    pub async fn sign_up(&self, input: SignupInput) -> SealboxResult<SignupOutput> {
        // 1. Normalize and validate input. Emails are case-folded at
        //    every write and lookup.
        let email = input.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidEmail.into());
        }
        if input.password.len() < self.config.min_password_length {
            return Err(AuthError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        // 2. Reject duplicate registrations.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        // 3. Hash the password and create the user.
        let password_hash = password::hash_password(&input.password, self.config.pepper.as_deref())
            .map_err(SealboxError::from)?;
        let name = input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let user = self
            .users
            .create(CreateUser {
                email: email.clone(),
                name,
                password_hash,
            })
            .await?;

        // 4. Provision the workspace under a free slug.
        let slug = self.available_slug(&email).await?;
        let organization = self
            .organizations
            .create(CreateOrganization {
                name: user.name.clone().unwrap_or_else(|| email.clone()),
                slug: slug.clone(),
            })
            .await?;

        // 5. Bind the user to it as OWNER.
        self.memberships
            .create(CreateMembership {
                user_id: user.id,
                organization_id: organization.id,
                role: MembershipRole::Owner,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            organization_id = %organization.id,
            slug,
            "account provisioned"
        );

        Ok(SignupOutput {
            user_id: user.id,
            organization_id: organization.id,
            slug,
        })
    }

    /// Verify credentials and return the account.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, email: &str, raw_password: &str) -> SealboxResult<User> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = password::verify_password(
            raw_password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )
        .map_err(SealboxError::from)?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(user)
    }

    /// Derive a free slug from the email local part: lowercase
    /// alphanumerics only, `org` if nothing survives, `-N` suffix on
    /// collision.
    async fn available_slug(&self, email: &str) -> SealboxResult<String> {
        let local = email.split('@').next().unwrap_or_default();
        let base: String = local
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        let base = if base.is_empty() { "org".to_string() } else { base };

        let mut slug = base.clone();
        let mut n = 0u32;
        while self.organizations.find_by_slug(&slug).await?.is_some() {
            n += 1;
            slug = format!("{base}-{n}");
        }
        Ok(slug)
    }
}
