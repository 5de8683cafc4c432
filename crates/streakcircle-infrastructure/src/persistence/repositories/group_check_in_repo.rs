use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use streakcircle_domain::activity::{GroupCheckIn, GroupCheckInRepository};
use streakcircle_domain::shared::{DomainError, GroupId, MemberId, DATE_FORMAT};

pub struct SqliteGroupCheckInRepository {
    base: SqliteRepositoryBase,
}

impl SqliteGroupCheckInRepository {
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
impl GroupCheckInRepository for SqliteGroupCheckInRepository {
    async fn save(&self, check_in: &GroupCheckIn) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO group_check_ins (group_id, check_in_date, member_id, energy_level, checked_in_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(group_id, check_in_date, member_id) DO UPDATE SET
                energy_level = ?4,
                checked_in_at = ?5
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(check_in.group_id().as_str())
                    .bind(check_in.date().format(DATE_FORMAT).to_string())
                    .bind(check_in.member_id().as_str())
                    .bind(i64::from(check_in.energy_level()))
                    .bind(check_in.checked_in_at()),
                "Save group check-in",
            )
            .await?;

        Ok(())
    }

    async fn has_entry(
        &self,
        group_id: &GroupId,
        date: NaiveDate,
        member_id: &MemberId,
    ) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1
                FROM group_check_ins
                WHERE group_id = ?1 AND check_in_date = ?2 AND member_id = ?3
            )
        "#;

        self.base
            .fetch_exists(
                sqlx::query_scalar(query)
                    .bind(group_id.as_str())
                    .bind(date.format(DATE_FORMAT).to_string())
                    .bind(member_id.as_str()),
                "Find group check-in entry",
            )
            .await
    }

    async fn has_legacy_entry(
        &self,
        group_id: &GroupId,
        date: NaiveDate,
        member_id: &MemberId,
    ) -> Result<bool, DomainError> {
        let query = r#"
            SELECT member_ids
            FROM group_check_in_days
            WHERE group_id = ?1 AND check_in_date = ?2
        "#;

        let row: Option<(String,)> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(group_id.as_str())
                    .bind(date.format(DATE_FORMAT).to_string()),
                "Find legacy group check-in day",
            )
            .await?;

        let Some((member_ids,)) = row else {
            return Ok(false);
        };

        let member_ids: Vec<String> = serde_json::from_str(&member_ids).map_err(|e| {
            DomainError::DataIntegrity(format!(
                "Malformed legacy check-in day {}/{}: {}",
                group_id, date, e
            ))
        })?;

        Ok(member_ids.iter().any(|id| id == member_id.as_str()))
    }
}
