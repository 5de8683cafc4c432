use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// The record kinds that count as qualifying activity, in lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivitySource {
    HabitCompletion,
    HealthLog,
    GroupCheckIn,
}

impl ActivitySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivitySource::HabitCompletion => "habit_completion",
            ActivitySource::HealthLog => "health_log",
            ActivitySource::GroupCheckIn => "group_check_in",
        }
    }
}

/// Result of a single source lookup.
///
/// `Degraded` means the lookup failed; it counts as absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySignal {
    Present,
    Absent,
    Degraded,
}

impl ActivitySignal {
    pub fn from_lookup(result: &Result<bool, DomainError>) -> Self {
        match result {
            Ok(true) => ActivitySignal::Present,
            Ok(false) => ActivitySignal::Absent,
            Err(_) => ActivitySignal::Degraded,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, ActivitySignal::Present)
    }
}
