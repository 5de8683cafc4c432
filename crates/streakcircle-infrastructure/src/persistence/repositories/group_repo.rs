use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::{ResultExt, SqliteRepositoryBase};
use streakcircle_domain::group::{Group, GroupRepository};
use streakcircle_domain::shared::{DomainError, GroupId, MemberId};
use streakcircle_domain::streak::StreakState;

#[derive(FromRow)]
struct GroupRow {
    id: String,
    name: String,
    streak: i64,
    last_streak_date: String,
    created_at: DateTime<Utc>,
}

impl GroupRow {
    fn try_into_group(self, members: Vec<MemberId>) -> Result<Group, DomainError> {
        let streak = StreakState::from_stored(self.streak, &self.last_streak_date)?;

        Ok(Group::restore(
            GroupId::from_string(&self.id),
            self.name,
            members,
            streak,
            self.created_at,
        ))
    }
}

pub struct SqliteGroupRepository {
    base: SqliteRepositoryBase,
}

impl SqliteGroupRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    pub fn with_base(base: SqliteRepositoryBase) -> Self {
        Self { base }
    }

    async fn find_members(&self, id: &GroupId) -> Result<Vec<MemberId>, DomainError> {
        let query = r#"
            SELECT member_id
            FROM group_members
            WHERE group_id = ?1
            ORDER BY position ASC, member_id ASC
        "#;

        let rows: Vec<(String,)> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(id.as_str()),
                "List group members",
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|(member_id,)| MemberId::from_string(&member_id))
            .collect())
    }
}

#[async_trait]
impl GroupRepository for SqliteGroupRepository {
    async fn save(&self, group: &Group) -> Result<(), DomainError> {
        let state = group.streak_state();
        let mut tx = self
            .base
            .pool()
            .begin()
            .await
            .with_repo_context("Begin save group")?;

        sqlx::query(
            r#"
            INSERT INTO groups (id, name, streak, last_streak_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = ?2,
                streak = ?3,
                last_streak_date = ?4
            "#,
        )
        .bind(group.id().as_str())
        .bind(group.name())
        .bind(i64::from(state.streak))
        .bind(state.last_streak_date_string())
        .bind(group.created_at())
        .execute(&mut *tx)
        .await
        .with_repo_context("Save group")?;

        sqlx::query("DELETE FROM group_members WHERE group_id = ?1")
            .bind(group.id().as_str())
            .execute(&mut *tx)
            .await
            .with_repo_context("Clear group members")?;

        for (position, member_id) in group.members().iter().enumerate() {
            sqlx::query(
                "INSERT INTO group_members (group_id, member_id, position) VALUES (?1, ?2, ?3)",
            )
            .bind(group.id().as_str())
            .bind(member_id.as_str())
            .bind(position as i64)
            .execute(&mut *tx)
            .await
            .with_repo_context("Insert group member")?;
        }

        tx.commit().await.with_repo_context("Commit save group")?;
        Ok(())
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        let query = r#"
            SELECT id, name, streak, last_streak_date, created_at
            FROM groups
            WHERE id = ?1
        "#;

        let row: Option<GroupRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(id.as_str()), "Find group by ID")
            .await?;

        match row {
            Some(row) => {
                let members = self.find_members(id).await?;
                row.try_into_group(members).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn save_streak(&self, id: &GroupId, state: &StreakState) -> Result<(), DomainError> {
        let query = r#"
            UPDATE groups
            SET streak = ?2, last_streak_date = ?3
            WHERE id = ?1
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(id.as_str())
                    .bind(i64::from(state.streak))
                    .bind(state.last_streak_date_string()),
                "Save group streak",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GroupNotFound(id.to_string()));
        }

        Ok(())
    }
}
