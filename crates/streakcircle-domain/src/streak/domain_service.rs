use chrono::NaiveDate;

use super::value_objects::{StreakState, StreakTransition, TransitionKind};

/// Domain service for group streak rules
/// Pure decision logic, no I/O
pub struct StreakDomainService;

impl StreakDomainService {
    /// Compute the next streak state from today's group-wide activity.
    ///
    /// Rules are evaluated in order:
    /// 1. not everyone active: streak drops to 0, last credit date is kept
    /// 2. already credited today: unchanged
    /// 3. credited yesterday with a live streak: streak + 1
    /// 4. anything else: restart at 1
    ///
    /// The result depends only on the inputs, so re-running it for a duplicate
    /// trigger on the same day is harmless.
    pub fn transition(
        state: StreakState,
        all_active_today: bool,
        today: NaiveDate,
        yesterday: NaiveDate,
    ) -> StreakTransition {
        let (kind, next) = if !all_active_today {
            (
                TransitionKind::Reset,
                StreakState::new(0, state.last_streak_date),
            )
        } else if state.is_credited_on(today) {
            (TransitionKind::AlreadyCredited, state)
        } else if state.is_credited_on(yesterday) && state.streak > 0 {
            (
                TransitionKind::Continued,
                StreakState::new(state.streak.saturating_add(1), Some(today)),
            )
        } else {
            (TransitionKind::Restarted, StreakState::new(1, Some(today)))
        };

        StreakTransition {
            kind,
            previous: state,
            next,
        }
    }
}
