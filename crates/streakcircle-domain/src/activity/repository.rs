use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::{GroupCheckIn, HabitCompletion, HealthLogEntry};
use crate::shared::{DomainError, GroupId, MemberId};

#[async_trait]
pub trait HabitCompletionRepository: Send + Sync {
    async fn save(&self, completion: &HabitCompletion) -> Result<(), DomainError>;

    /// Whether the member completed any habit within `[start, end]` (inclusive).
    async fn exists_for_member_between(
        &self,
        member_id: &MemberId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait HealthLogRepository: Send + Sync {
    async fn save(&self, entry: &HealthLogEntry) -> Result<(), DomainError>;

    /// Whether the member's daily log for exactly `date` has any entry.
    async fn has_entry_on(&self, member_id: &MemberId, date: NaiveDate)
        -> Result<bool, DomainError>;
}

/// Group check-ins live in two storage shapes: one row per member entry, and
/// the older per-day document listing every member who checked in. Both are
/// still read.
#[async_trait]
pub trait GroupCheckInRepository: Send + Sync {
    async fn save(&self, check_in: &GroupCheckIn) -> Result<(), DomainError>;

    /// Per-member entry shape: `(group, date, member)`.
    async fn has_entry(
        &self,
        group_id: &GroupId,
        date: NaiveDate,
        member_id: &MemberId,
    ) -> Result<bool, DomainError>;

    /// Legacy per-day document shape: `(group, date) -> [member...]`.
    async fn has_legacy_entry(
        &self,
        group_id: &GroupId,
        date: NaiveDate,
        member_id: &MemberId,
    ) -> Result<bool, DomainError>;
}
