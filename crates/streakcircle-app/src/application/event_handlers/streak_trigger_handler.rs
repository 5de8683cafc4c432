use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use streakcircle_domain::events::activity_events::*;
use streakcircle_domain::events::EventHandler;
use streakcircle_domain::shared::{Clock, DomainError, MemberId};

use crate::application::services::{EvaluationOutcome, StreakUpdateCoordinator};

/// Handler for activity events that may move a group streak
///
/// Every activity event re-evaluates the groups of the acting member.
/// Health-log and check-in events dated anything but today are backfills and
/// never touch streaks.
#[derive(Clone)]
pub struct StreakTriggerHandler {
    coordinator: Arc<StreakUpdateCoordinator>,
    clock: Arc<dyn Clock>,
}

impl StreakTriggerHandler {
    pub fn new(coordinator: Arc<StreakUpdateCoordinator>, clock: Arc<dyn Clock>) -> Self {
        Self { coordinator, clock }
    }

    async fn evaluate_for(&self, member_id: &MemberId) {
        let outcomes = self.coordinator.evaluate_member_groups(member_id).await;
        let persisted = outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, EvaluationOutcome::Persisted(_)))
            .count();
        info!(
            "Evaluated {} group(s) for member {} ({} updated)",
            outcomes.len(),
            member_id,
            persisted
        );
    }

    fn is_backfill(&self, date: NaiveDate) -> bool {
        date != self.clock.today()
    }
}

#[async_trait]
impl EventHandler<HabitCompletionCreated> for StreakTriggerHandler {
    async fn handle(&self, event: &HabitCompletionCreated) -> Result<(), DomainError> {
        info!(
            "Handling HabitCompletionCreated for member {} (habit {})",
            event.member_id, event.habit_id
        );
        self.evaluate_for(&event.member_id).await;
        Ok(())
    }
}

#[async_trait]
impl EventHandler<HealthLogEntryCreated> for StreakTriggerHandler {
    async fn handle(&self, event: &HealthLogEntryCreated) -> Result<(), DomainError> {
        info!(
            "Handling HealthLogEntryCreated for member {} on {}",
            event.member_id, event.date
        );

        if self.is_backfill(event.date) {
            info!("Health log entry is not for today, skipping streak evaluation");
            return Ok(());
        }

        self.evaluate_for(&event.member_id).await;
        Ok(())
    }
}

#[async_trait]
impl EventHandler<GroupCheckInCreated> for StreakTriggerHandler {
    async fn handle(&self, event: &GroupCheckInCreated) -> Result<(), DomainError> {
        info!(
            "Handling GroupCheckInCreated for member {} in group {} on {}",
            event.member_id, event.group_id, event.date
        );

        if self.is_backfill(event.date) {
            info!("Check-in is not for today, skipping streak evaluation");
            return Ok(());
        }

        self.evaluate_for(&event.member_id).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use streakcircle_domain::shared::{GroupId, HabitId};
    use streakcircle_domain::streak::StreakState;

    use crate::application::services::streak::fakes::{date, noon, StreakWorld};

    fn handler(world: &StreakWorld) -> StreakTriggerHandler {
        let clock: Arc<dyn Clock> = world.clock.clone();
        StreakTriggerHandler::new(world.coordinator(), clock)
    }

    #[tokio::test]
    async fn habit_completion_evaluates_member_groups() {
        let world = StreakWorld::new(date(2024, 1, 10));
        let group_id = world
            .add_group("g1", &["a"], StreakState::default())
            .await;
        world.complete_habit("a", date(2024, 1, 10)).await;

        let event = HabitCompletionCreated {
            member_id: MemberId::from_string("a"),
            habit_id: HabitId::from_string("walk"),
            completed_at: noon(date(2024, 1, 10)),
            occurred_at: Utc::now(),
        };
        handler(&world).handle(&event).await.unwrap();

        assert_eq!(
            world.groups.stored_state(&group_id).await,
            Some(StreakState::new(1, Some(date(2024, 1, 10))))
        );
    }

    #[tokio::test]
    async fn backdated_health_log_never_touches_streak() {
        let world = StreakWorld::new(date(2024, 1, 10));
        let group_id = world
            .add_group("g1", &["a"], StreakState::new(3, Some(date(2024, 1, 9))))
            .await;

        let event = HealthLogEntryCreated {
            member_id: MemberId::from_string("a"),
            date: date(2024, 1, 8),
            occurred_at: Utc::now(),
        };
        handler(&world).handle(&event).await.unwrap();

        // Evaluating would have reset the streak: no activity today
        assert_eq!(world.groups.writes(), 0);
        assert_eq!(
            world.groups.stored_state(&group_id).await,
            Some(StreakState::new(3, Some(date(2024, 1, 9))))
        );
    }

    #[tokio::test]
    async fn todays_health_log_evaluates() {
        let world = StreakWorld::new(date(2024, 1, 10));
        let group_id = world
            .add_group("g1", &["a"], StreakState::new(3, Some(date(2024, 1, 9))))
            .await;
        world.log_health("a", date(2024, 1, 10)).await;

        let event = HealthLogEntryCreated {
            member_id: MemberId::from_string("a"),
            date: date(2024, 1, 10),
            occurred_at: Utc::now(),
        };
        handler(&world).handle(&event).await.unwrap();

        assert_eq!(
            world.groups.stored_state(&group_id).await,
            Some(StreakState::new(4, Some(date(2024, 1, 10))))
        );
    }

    #[tokio::test]
    async fn check_in_date_guard() {
        let world = StreakWorld::new(date(2024, 1, 10));
        let group_id = world
            .add_group("g1", &["a"], StreakState::default())
            .await;
        world.check_in(&group_id, "a", date(2024, 1, 10)).await;
        let handler = handler(&world);

        let backfill = GroupCheckInCreated {
            group_id: GroupId::from_string("g1"),
            date: date(2024, 1, 9),
            member_id: MemberId::from_string("a"),
            energy_level: 2,
            occurred_at: Utc::now(),
        };
        handler.handle(&backfill).await.unwrap();
        assert_eq!(world.groups.writes(), 0);

        let current = GroupCheckInCreated {
            date: date(2024, 1, 10),
            ..backfill
        };
        handler.handle(&current).await.unwrap();
        assert_eq!(
            world.groups.stored_state(&group_id).await,
            Some(StreakState::new(1, Some(date(2024, 1, 10))))
        );
    }

    #[tokio::test]
    async fn handler_never_fails_on_store_errors() {
        let world = StreakWorld::new(date(2024, 1, 10));
        world.add_group("g1", &["a"], StreakState::default()).await;
        world.complete_habit("a", date(2024, 1, 10)).await;
        world
            .groups
            .fail_writes
            .store(true, std::sync::atomic::Ordering::SeqCst);

        let event = HabitCompletionCreated {
            member_id: MemberId::from_string("a"),
            habit_id: HabitId::from_string("walk"),
            completed_at: noon(date(2024, 1, 10)),
            occurred_at: Utc::now(),
        };

        assert!(handler(&world).handle(&event).await.is_ok());
    }
}
