use log::{error, info, warn};
use std::sync::Arc;

use streakcircle_domain::group::GroupRepository;
use streakcircle_domain::member::MemberProfileRepository;
use streakcircle_domain::shared::{previous_day, Clock, DomainError, GroupId, MemberId};
use streakcircle_domain::streak::{StreakDomainService, StreakTransition};

use super::GroupActivityAggregator;

/// What a single evaluation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationOutcome {
    /// The group does not exist; nothing was read beyond the lookup
    GroupMissing,
    /// The rules produced the stored state again; nothing was written
    Unchanged(StreakTransition),
    /// The new state was written in one update
    Persisted(StreakTransition),
    /// A read or write failed; the error has been logged
    Failed(String),
}

impl EvaluationOutcome {
    pub fn transition(&self) -> Option<&StreakTransition> {
        match self {
            EvaluationOutcome::Unchanged(t) | EvaluationOutcome::Persisted(t) => Some(t),
            _ => None,
        }
    }
}

/// Runs one streak evaluation per group: load, aggregate today's activity,
/// apply the streak rules, and write back only when the state moved.
///
/// Errors never leave this type; they are logged and reported as
/// `EvaluationOutcome::Failed`.
pub struct StreakUpdateCoordinator {
    group_repo: Arc<dyn GroupRepository>,
    member_repo: Arc<dyn MemberProfileRepository>,
    aggregator: Arc<GroupActivityAggregator>,
    clock: Arc<dyn Clock>,
}

impl StreakUpdateCoordinator {
    pub fn new(
        group_repo: Arc<dyn GroupRepository>,
        member_repo: Arc<dyn MemberProfileRepository>,
        aggregator: Arc<GroupActivityAggregator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            group_repo,
            member_repo,
            aggregator,
            clock,
        }
    }

    pub async fn evaluate(&self, group_id: &GroupId) -> EvaluationOutcome {
        match self.try_evaluate(group_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    "Streak evaluation failed for group {}: {}",
                    group_id,
                    e.format_with_code()
                );
                EvaluationOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_evaluate(&self, group_id: &GroupId) -> Result<EvaluationOutcome, DomainError> {
        let Some(group) = self.group_repo.find_by_id(group_id).await? else {
            info!("Group {} not found, skipping streak evaluation", group_id);
            return Ok(EvaluationOutcome::GroupMissing);
        };

        // Sampled once so the whole evaluation agrees on the calendar day
        let today = self.clock.today();
        let yesterday = previous_day(today);

        let all_active = self
            .aggregator
            .all_members_active(group.members(), today)
            .await;

        let transition =
            StreakDomainService::transition(group.streak_state(), all_active, today, yesterday);

        if !transition.is_change() {
            info!(
                "Group {} streak unchanged at {} ({})",
                group_id,
                transition.next,
                transition.kind.as_str()
            );
            return Ok(EvaluationOutcome::Unchanged(transition));
        }

        self.group_repo
            .save_streak(group_id, &transition.next)
            .await?;

        info!(
            "Group {} streak {} -> {} ({})",
            group_id,
            transition.previous,
            transition.next,
            transition.kind.as_str()
        );

        Ok(EvaluationOutcome::Persisted(transition))
    }

    /// Evaluate every group listed on the member's profile, one at a time.
    ///
    /// A missing or unreadable profile evaluates nothing.
    pub async fn evaluate_member_groups(
        &self,
        member_id: &MemberId,
    ) -> Vec<(GroupId, EvaluationOutcome)> {
        let profile = match self.member_repo.find_by_id(member_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                info!("No profile for member {}, nothing to evaluate", member_id);
                return Vec::new();
            }
            Err(e) => {
                warn!(
                    "Failed to load profile for member {}: {}",
                    member_id,
                    e.format_with_code()
                );
                return Vec::new();
            }
        };

        let mut outcomes = Vec::with_capacity(profile.group_ids().len());
        for group_id in profile.group_ids() {
            let outcome = self.evaluate(group_id).await;
            outcomes.push((group_id.clone(), outcome));
        }
        outcomes
    }
}
