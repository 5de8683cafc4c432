use chrono::NaiveDate;
use log::{debug, warn};
use std::sync::Arc;

use streakcircle_domain::activity::{
    utc_day_bounds, ActivitySignal, ActivitySource, GroupCheckInRepository,
    HabitCompletionRepository, HealthLogRepository,
};
use streakcircle_domain::member::MemberProfileRepository;
use streakcircle_domain::shared::{DomainError, GroupId, MemberId};

/// Answers "did this member do anything qualifying on this date?"
///
/// Sources are checked in a fixed order and the first positive wins, so later
/// sources are never read once one matches. A failing source counts as no
/// signal for that source only.
pub struct ActivitySignalProbe {
    habit_repo: Arc<dyn HabitCompletionRepository>,
    health_log_repo: Arc<dyn HealthLogRepository>,
    check_in_repo: Arc<dyn GroupCheckInRepository>,
    member_repo: Arc<dyn MemberProfileRepository>,
}

impl ActivitySignalProbe {
    pub fn new(
        habit_repo: Arc<dyn HabitCompletionRepository>,
        health_log_repo: Arc<dyn HealthLogRepository>,
        check_in_repo: Arc<dyn GroupCheckInRepository>,
        member_repo: Arc<dyn MemberProfileRepository>,
    ) -> Self {
        Self {
            habit_repo,
            health_log_repo,
            check_in_repo,
            member_repo,
        }
    }

    pub async fn has_activity(&self, member_id: &MemberId, date: NaiveDate) -> bool {
        match self.first_present_source(member_id, date).await {
            Some(source) => {
                debug!(
                    "Member {} active on {} via {}",
                    member_id,
                    date,
                    source.as_str()
                );
                true
            }
            None => {
                debug!("Member {} has no activity on {}", member_id, date);
                false
            }
        }
    }

    async fn first_present_source(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> Option<ActivitySource> {
        if self.habit_completion_signal(member_id, date).await.is_present() {
            return Some(ActivitySource::HabitCompletion);
        }
        if self.health_log_signal(member_id, date).await.is_present() {
            return Some(ActivitySource::HealthLog);
        }
        if self.group_check_in_signal(member_id, date).await.is_present() {
            return Some(ActivitySource::GroupCheckIn);
        }
        None
    }

    async fn habit_completion_signal(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> ActivitySignal {
        let (start, end) = utc_day_bounds(date);
        let result = self
            .habit_repo
            .exists_for_member_between(member_id, start, end)
            .await;
        observe(ActivitySource::HabitCompletion, member_id, date, result)
    }

    async fn health_log_signal(&self, member_id: &MemberId, date: NaiveDate) -> ActivitySignal {
        let result = self.health_log_repo.has_entry_on(member_id, date).await;
        observe(ActivitySource::HealthLog, member_id, date, result)
    }

    /// Checks every group the member belongs to, in both storage shapes.
    async fn group_check_in_signal(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> ActivitySignal {
        let profile = match self.member_repo.find_by_id(member_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return ActivitySignal::Absent,
            Err(e) => {
                return observe(ActivitySource::GroupCheckIn, member_id, date, Err(e));
            }
        };

        let mut degraded = false;
        for group_id in profile.group_ids() {
            match self.group_check_in_in(group_id, member_id, date).await {
                ActivitySignal::Present => return ActivitySignal::Present,
                ActivitySignal::Degraded => degraded = true,
                ActivitySignal::Absent => {}
            }
        }

        if degraded {
            ActivitySignal::Degraded
        } else {
            ActivitySignal::Absent
        }
    }

    async fn group_check_in_in(
        &self,
        group_id: &GroupId,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> ActivitySignal {
        let entry = self.check_in_repo.has_entry(group_id, date, member_id).await;
        let entry = observe(ActivitySource::GroupCheckIn, member_id, date, entry);
        if entry.is_present() {
            return entry;
        }

        let legacy = self
            .check_in_repo
            .has_legacy_entry(group_id, date, member_id)
            .await;
        match observe(ActivitySource::GroupCheckIn, member_id, date, legacy) {
            ActivitySignal::Absent => entry,
            signal => signal,
        }
    }
}

/// Turns a source lookup into a signal; failures become `Degraded`.
fn observe(
    source: ActivitySource,
    member_id: &MemberId,
    date: NaiveDate,
    result: Result<bool, DomainError>,
) -> ActivitySignal {
    if let Err(e) = &result {
        warn!(
            "Activity source {} unavailable for member {} on {}: {}",
            source.as_str(),
            member_id,
            date,
            e.format_with_code()
        );
    }
    ActivitySignal::from_lookup(&result)
}
