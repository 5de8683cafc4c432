use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use streakcircle_domain::activity::{HealthLogEntry, HealthLogRepository};
use streakcircle_domain::shared::{DomainError, MemberId, DATE_FORMAT};

pub struct SqliteHealthLogRepository {
    base: SqliteRepositoryBase,
}

impl SqliteHealthLogRepository {
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
impl HealthLogRepository for SqliteHealthLogRepository {
    async fn save(&self, entry: &HealthLogEntry) -> Result<(), DomainError> {
        let query = r#"
            INSERT OR REPLACE INTO health_log_entries (id, member_id, log_date, kind, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(entry.id())
                    .bind(entry.member_id().as_str())
                    .bind(entry.date().format(DATE_FORMAT).to_string())
                    .bind(entry.kind())
                    .bind(entry.recorded_at()),
                "Save health log entry",
            )
            .await?;

        Ok(())
    }

    async fn has_entry_on(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1
                FROM health_log_entries
                WHERE member_id = ?1 AND log_date = ?2
            )
        "#;

        self.base
            .fetch_exists(
                sqlx::query_scalar(query)
                    .bind(member_id.as_str())
                    .bind(date.format(DATE_FORMAT).to_string()),
                "Find health log entry on date",
            )
            .await
    }
}
