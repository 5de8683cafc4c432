use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::{ResultExt, SqliteRepositoryBase};
use streakcircle_domain::member::{MemberProfile, MemberProfileRepository};
use streakcircle_domain::shared::{DomainError, GroupId, MemberId};

#[derive(FromRow)]
struct MemberProfileRow {
    id: String,
    display_name: String,
}

pub struct SqliteMemberProfileRepository {
    base: SqliteRepositoryBase,
}

impl SqliteMemberProfileRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    pub fn with_base(base: SqliteRepositoryBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl MemberProfileRepository for SqliteMemberProfileRepository {
    async fn save(&self, profile: &MemberProfile) -> Result<(), DomainError> {
        let mut tx = self
            .base
            .pool()
            .begin()
            .await
            .with_repo_context("Begin save member profile")?;

        sqlx::query(
            r#"
            INSERT INTO member_profiles (id, display_name)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET display_name = ?2
            "#,
        )
        .bind(profile.id().as_str())
        .bind(profile.display_name())
        .execute(&mut *tx)
        .await
        .with_repo_context("Save member profile")?;

        sqlx::query("DELETE FROM member_groups WHERE member_id = ?1")
            .bind(profile.id().as_str())
            .execute(&mut *tx)
            .await
            .with_repo_context("Clear member groups")?;

        for (position, group_id) in profile.group_ids().iter().enumerate() {
            sqlx::query(
                "INSERT INTO member_groups (member_id, group_id, position) VALUES (?1, ?2, ?3)",
            )
            .bind(profile.id().as_str())
            .bind(group_id.as_str())
            .bind(position as i64)
            .execute(&mut *tx)
            .await
            .with_repo_context("Insert member group")?;
        }

        tx.commit()
            .await
            .with_repo_context("Commit save member profile")?;
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<MemberProfile>, DomainError> {
        let row: Option<MemberProfileRow> = self
            .base
            .fetch_optional(
                sqlx::query_as("SELECT id, display_name FROM member_profiles WHERE id = ?1")
                    .bind(id.as_str()),
                "Find member profile by ID",
            )
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let groups: Vec<(String,)> = self
            .base
            .fetch_all(
                sqlx::query_as(
                    r#"
                    SELECT group_id
                    FROM member_groups
                    WHERE member_id = ?1
                    ORDER BY position ASC, group_id ASC
                    "#,
                )
                .bind(id.as_str()),
                "List member groups",
            )
            .await?;

        Ok(Some(MemberProfile::new(
            MemberId::from_string(&row.id),
            row.display_name,
            groups
                .into_iter()
                .map(|(group_id,)| GroupId::from_string(&group_id))
                .collect(),
        )))
    }
}
