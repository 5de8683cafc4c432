use log::{info, warn};
use std::sync::Arc;

use crate::application::dtos::GroupStreakDto;
use streakcircle_domain::group::{Group, GroupRepository};
use streakcircle_domain::member::MemberProfileRepository;
use streakcircle_domain::shared::{
    previous_day, Clock, DomainError, GroupId, MemberId, DATE_FORMAT,
};

/// Read-only views of stored group streaks
///
/// Nothing here re-evaluates activity; the figures are what the last
/// evaluation persisted.
pub struct GroupStreakQueries {
    group_repo: Arc<dyn GroupRepository>,
    member_repo: Arc<dyn MemberProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl GroupStreakQueries {
    pub fn new(
        group_repo: Arc<dyn GroupRepository>,
        member_repo: Arc<dyn MemberProfileRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            group_repo,
            member_repo,
            clock,
        }
    }

    pub async fn get_group_streak(&self, group_id: &str) -> Result<GroupStreakDto, DomainError> {
        let id = GroupId::from_string(group_id);
        let group = self
            .group_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(group_id.to_string()))?;

        let dto = self.to_dto(&group);

        info!(
            "[streak] get_group_streak group_id={} streak={} credited_today={} at_risk={}",
            dto.group_id, dto.streak, dto.credited_today, dto.at_risk
        );

        Ok(dto)
    }

    /// Streaks of every group on the member's profile.
    ///
    /// Groups that no longer exist are skipped.
    pub async fn get_member_streaks(
        &self,
        member_id: &str,
    ) -> Result<Vec<GroupStreakDto>, DomainError> {
        let profile = self
            .member_repo
            .find_by_id(&MemberId::from_string(member_id))
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(member_id.to_string()))?;

        let mut streaks = Vec::with_capacity(profile.group_ids().len());
        for group_id in profile.group_ids() {
            match self.group_repo.find_by_id(group_id).await? {
                Some(group) => streaks.push(self.to_dto(&group)),
                None => warn!(
                    "Member {} lists unknown group {}, skipping",
                    member_id, group_id
                ),
            }
        }

        Ok(streaks)
    }

    fn to_dto(&self, group: &Group) -> GroupStreakDto {
        let state = group.streak_state();
        let today = self.clock.today();
        let yesterday = previous_day(today);

        GroupStreakDto {
            group_id: group.id().to_string(),
            group_name: group.name().to_string(),
            member_count: group.member_count(),
            streak: state.streak,
            last_streak_date: state
                .last_streak_date
                .map(|d| d.format(DATE_FORMAT).to_string()),
            credited_today: state.streak > 0 && state.is_credited_on(today),
            at_risk: state.streak > 0 && state.is_credited_on(yesterday),
        }
    }
}
