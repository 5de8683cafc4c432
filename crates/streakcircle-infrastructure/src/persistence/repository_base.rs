use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::ResultExt;
use crate::config::TimeoutConfig;
use streakcircle_domain::shared::DomainError;

/// Shared plumbing for SQLite repositories: every statement is bounded by the
/// query timeout and its error is tagged with the operation name.
#[derive(Clone)]
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
    query_timeout: Duration,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self::with_timeouts(pool, TimeoutConfig::global())
    }

    pub fn with_timeouts(pool: Arc<SqlitePool>, timeouts: &TimeoutConfig) -> Self {
        Self {
            pool,
            query_timeout: timeouts.db_query,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        self.bounded(query.execute(self.pool.as_ref()), context)
            .await
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        self.bounded(query.fetch_optional(self.pool.as_ref()), context)
            .await
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        self.bounded(query.fetch_all(self.pool.as_ref()), context)
            .await
    }

    /// Run a `SELECT EXISTS(...)` style query
    pub async fn fetch_exists<'q>(
        &self,
        query: QueryScalar<'q, Sqlite, i64, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<bool, DomainError> {
        let found = self
            .bounded(query.fetch_one(self.pool.as_ref()), context)
            .await?;
        Ok(found != 0)
    }

    async fn bounded<T, F>(&self, fut: F, context: &str) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => result.with_repo_context(context),
            Err(_) => Err(DomainError::Timeout(format!(
                "{}: exceeded {}ms",
                context,
                self.query_timeout.as_millis()
            ))),
        }
    }
}
