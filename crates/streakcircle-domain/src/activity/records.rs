use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, GroupId, HabitId, MemberId};

/// Inclusive UTC bounds of a calendar day: `[00:00:00.000, 23:59:59.999]`
pub fn utc_day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCompletion {
    id: String,
    member_id: MemberId,
    habit_id: HabitId,
    completed_at: DateTime<Utc>,
}

impl HabitCompletion {
    pub fn new(
        id: String,
        member_id: MemberId,
        habit_id: HabitId,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id.is_empty() {
            return Err(DomainError::Validation(
                "Habit completion id cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id,
            member_id,
            habit_id,
            completed_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthLogEntry {
    id: String,
    member_id: MemberId,
    date: NaiveDate,
    kind: String, // e.g. "sleep", "water", "mood"
    recorded_at: DateTime<Utc>,
}

impl HealthLogEntry {
    pub fn new(
        id: String,
        member_id: MemberId,
        date: NaiveDate,
        kind: String,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id.is_empty() {
            return Err(DomainError::Validation(
                "Health log entry id cannot be empty".to_string(),
            ));
        }
        if kind.trim().is_empty() {
            return Err(DomainError::Validation(
                "Health log entry kind cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id,
            member_id,
            date,
            kind,
            recorded_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCheckIn {
    group_id: GroupId,
    date: NaiveDate,
    member_id: MemberId,
    energy_level: u8,
    checked_in_at: DateTime<Utc>,
}

impl GroupCheckIn {
    pub const MAX_ENERGY_LEVEL: u8 = 5;

    pub fn new(
        group_id: GroupId,
        date: NaiveDate,
        member_id: MemberId,
        energy_level: u8,
        checked_in_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if energy_level > Self::MAX_ENERGY_LEVEL {
            return Err(DomainError::Validation(format!(
                "Energy level must be between 0 and {}, got {}",
                Self::MAX_ENERGY_LEVEL,
                energy_level
            )));
        }

        Ok(Self {
            group_id,
            date,
            member_id,
            energy_level,
            checked_in_at,
        })
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn energy_level(&self) -> u8 {
        self.energy_level
    }

    pub fn checked_in_at(&self) -> DateTime<Utc> {
        self.checked_in_at
    }
}
