use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::{GroupId, HabitId, MemberId};

/// Macro to implement DomainEvent trait with type name
macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Event fired when a member completes a habit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCompletionCreated {
    pub member_id: MemberId,
    pub habit_id: HabitId,
    pub completed_at: DateTime<Utc>,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitCompletionCreated);

/// Event fired when a member writes an entry into their daily health log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthLogEntryCreated {
    pub member_id: MemberId,
    pub date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HealthLogEntryCreated);

/// Event fired when a member checks into a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCheckInCreated {
    pub group_id: GroupId,
    pub date: NaiveDate,
    pub member_id: MemberId,
    pub energy_level: u8,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(GroupCheckInCreated);
