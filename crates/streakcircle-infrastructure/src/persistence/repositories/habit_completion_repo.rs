use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use streakcircle_domain::activity::{HabitCompletion, HabitCompletionRepository};
use streakcircle_domain::shared::{DomainError, MemberId};

pub struct SqliteHabitCompletionRepository {
    base: SqliteRepositoryBase,
}

impl SqliteHabitCompletionRepository {
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
impl HabitCompletionRepository for SqliteHabitCompletionRepository {
    async fn save(&self, completion: &HabitCompletion) -> Result<(), DomainError> {
        let query = r#"
            INSERT OR REPLACE INTO habit_completions (id, member_id, habit_id, completed_at)
            VALUES (?1, ?2, ?3, ?4)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(completion.id())
                    .bind(completion.member_id().as_str())
                    .bind(completion.habit_id().as_str())
                    .bind(completion.completed_at().timestamp_millis()),
                "Save habit completion",
            )
            .await?;

        Ok(())
    }

    async fn exists_for_member_between(
        &self,
        member_id: &MemberId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1
                FROM habit_completions
                WHERE member_id = ?1
                  AND completed_at >= ?2
                  AND completed_at <= ?3
            )
        "#;

        self.base
            .fetch_exists(
                sqlx::query_scalar(query)
                    .bind(member_id.as_str())
                    .bind(start.timestamp_millis())
                    .bind(end.timestamp_millis()),
                "Find habit completion in range",
            )
            .await
    }
}
