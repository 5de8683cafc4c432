use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, DATE_FORMAT};

/// Persisted streak fields of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    pub streak: u32,
    pub last_streak_date: Option<NaiveDate>, // None is stored as ""
}

impl StreakState {
    pub fn new(streak: u32, last_streak_date: Option<NaiveDate>) -> Self {
        Self {
            streak,
            last_streak_date,
        }
    }

    /// Parse the stored form, where an empty string means "never credited"
    pub fn from_stored(streak: i64, last_streak_date: &str) -> Result<Self, DomainError> {
        let streak = u32::try_from(streak).map_err(|_| {
            DomainError::DataIntegrity(format!("Streak out of range: {}", streak))
        })?;

        let trimmed = last_streak_date.trim();
        let last_streak_date = if trimmed.is_empty() {
            None
        } else {
            Some(NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|e| {
                DomainError::DataIntegrity(format!(
                    "Invalid last_streak_date: {} ({})",
                    last_streak_date, e
                ))
            })?)
        };

        Ok(Self::new(streak, last_streak_date))
    }

    pub fn last_streak_date_string(&self) -> String {
        self.last_streak_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    pub fn is_credited_on(&self, date: NaiveDate) -> bool {
        self.last_streak_date == Some(date)
    }
}

impl std::fmt::Display for StreakState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, \"{}\")", self.streak, self.last_streak_date_string())
    }
}

/// Which rule decided the new state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    Reset,
    AlreadyCredited,
    Continued,
    Restarted,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Reset => "reset",
            TransitionKind::AlreadyCredited => "already_credited",
            TransitionKind::Continued => "continued",
            TransitionKind::Restarted => "restarted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakTransition {
    pub kind: TransitionKind,
    pub previous: StreakState,
    pub next: StreakState,
}

impl StreakTransition {
    pub fn is_change(&self) -> bool {
        self.previous != self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored_empty_date() {
        let state = StreakState::from_stored(0, "").unwrap();
        assert_eq!(state, StreakState::default());
        assert_eq!(state.last_streak_date_string(), "");
    }

    #[test]
    fn test_from_stored_with_date() {
        let state = StreakState::from_stored(3, "2024-01-09").unwrap();
        assert_eq!(state.streak, 3);
        assert_eq!(
            state.last_streak_date,
            NaiveDate::from_ymd_opt(2024, 1, 9)
        );
        assert_eq!(state.to_string(), "(3, \"2024-01-09\")");
    }

    #[test]
    fn test_from_stored_rejects_negative_streak() {
        let result = StreakState::from_stored(-1, "");
        assert!(matches!(result, Err(DomainError::DataIntegrity(_))));
    }

    #[test]
    fn test_from_stored_rejects_malformed_date() {
        let result = StreakState::from_stored(2, "01/09/2024");
        assert!(matches!(result, Err(DomainError::DataIntegrity(_))));
    }
}
