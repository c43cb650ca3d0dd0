//! SurrealDB implementation of [`MembershipRepository`].

use chrono::{DateTime, Utc};
use sealbox_core::error::SealboxResult;
use sealbox_core::models::membership::{CreateMembership, Membership, MembershipRole};
use sealbox_core::repository::MembershipRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct MembershipRow {
    user_id: String,
    organization_id: String,
    role: String,
    created_at: DateTime<Utc>,
}

fn parse_role(s: &str) -> Result<MembershipRole, DbError> {
    match s {
        "OWNER" => Ok(MembershipRole::Owner),
        "MEMBER" => Ok(MembershipRole::Member),
        other => Err(DbError::Decode(format!("unknown membership role: {other}"))),
    }
}

impl MembershipRow {
    fn try_into_membership(self) -> Result<Membership, DbError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid org UUID: {e}")))?;
        Ok(Membership {
            user_id,
            organization_id,
            role: parse_role(&self.role)?,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Membership repository.
#[derive(Clone)]
pub struct SurrealMembershipRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMembershipRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> MembershipRepository for SurrealMembershipRepository<C> {
    async fn create(&self, input: CreateMembership) -> SealboxResult<Membership> {
        let result = self
            .db
            .query(
                "CREATE membership SET \
                 user_id = $user_id, \
                 organization_id = $organization_id, \
                 role = $role",
            )
            .bind(("user_id", input.user_id.to_string()))
            .bind(("organization_id", input.organization_id.to_string()))
            .bind(("role", input.role.as_str()))
            .await
            .map_err(DbError::from)?;

        // check() surfaces unique-index violations on (user, org).
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<MembershipRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "membership".into(),
            id: format!("user={},org={}", input.user_id, input.organization_id),
        })?;

        Ok(row.try_into_membership()?)
    }

    async fn find(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> SealboxResult<Option<Membership>> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM membership \
                 WHERE user_id = $user_id \
                 AND organization_id = $organization_id",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("organization_id", organization_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MembershipRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_membership()?)),
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: Uuid) -> SealboxResult<Vec<Membership>> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM membership \
                 WHERE user_id = $user_id \
                 ORDER BY created_at ASC",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MembershipRow> = result.take(0).map_err(DbError::from)?;
        let memberships = rows
            .into_iter()
            .map(MembershipRow::try_into_membership)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(memberships)
    }
}
