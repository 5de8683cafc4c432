use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::shared::{DomainError, GroupId, MemberId};
use crate::streak::StreakState;

/// A circle of members sharing one collective streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    members: Vec<MemberId>,
    streak: StreakState,
    created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(id: GroupId, name: String, members: Vec<MemberId>) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Group name cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = members.iter().find(|m| !seen.insert(*m)) {
            return Err(DomainError::Validation(format!(
                "Duplicate member in group: {}",
                dup
            )));
        }

        Ok(Self {
            id,
            name: name.trim().to_string(),
            members,
            streak: StreakState::default(),
            created_at: Utc::now(),
        })
    }

    pub fn restore(
        id: GroupId,
        name: String,
        members: Vec<MemberId>,
        streak: StreakState,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            members,
            streak,
            created_at,
        }
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn has_members(&self) -> bool {
        !self.members.is_empty()
    }

    pub fn is_member(&self, member_id: &MemberId) -> bool {
        self.members.contains(member_id)
    }

    pub fn streak_state(&self) -> StreakState {
        self.streak
    }

    pub fn streak(&self) -> u32 {
        self.streak.streak
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn record_streak(&mut self, state: StreakState) {
        self.streak = state;
    }
}
