//! Newline-delimited JSON intake of activity triggers.
//!
//! Each line is one envelope tagged by `type`:
//!
//! ```text
//! {"type":"habit_completion_created","member_id":"a","habit_id":"walk","completed_at":"2024-01-10T07:30:00Z"}
//! {"type":"health_log_entry_created","member_id":"a","date":"2024-01-10"}
//! {"type":"group_checkin_created","group_id":"g1","date":"2024-01-10","member_id":"a","energy_level":4}
//! ```
//!
//! Envelopes become domain events on the event bus. Lines that cannot be
//! understood are logged and skipped.

use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use streakcircle_domain::activity::GroupCheckIn;
use streakcircle_domain::events::activity_events::*;
use streakcircle_domain::events::{DomainEvent, EventBus};
use streakcircle_domain::shared::{DomainError, GroupId, HabitId, MemberId};

use super::error::ErrorResponse;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerEnvelope {
    HabitCompletionCreated {
        member_id: String,
        habit_id: String,
        completed_at: DateTime<Utc>,
    },
    HealthLogEntryCreated {
        member_id: String,
        date: NaiveDate,
    },
    GroupCheckinCreated {
        group_id: String,
        date: NaiveDate,
        member_id: String,
        #[serde(default)]
        energy_level: u8,
    },
}

impl TriggerEnvelope {
    pub fn parse(line: &str) -> Result<Self, DomainError> {
        serde_json::from_str(line)
            .map_err(|e| DomainError::InvalidInput(format!("Unreadable trigger envelope: {}", e)))
    }

    /// Convert into the matching domain event, stamped with `occurred_at`
    pub fn into_event(self, occurred_at: DateTime<Utc>) -> Result<Box<dyn DomainEvent>, DomainError> {
        match self {
            TriggerEnvelope::HabitCompletionCreated {
                member_id,
                habit_id,
                completed_at,
            } => Ok(Box::new(HabitCompletionCreated {
                member_id: MemberId::from_string(required("member_id", &member_id)?),
                habit_id: HabitId::from_string(required("habit_id", &habit_id)?),
                completed_at,
                occurred_at,
            })),
            TriggerEnvelope::HealthLogEntryCreated { member_id, date } => {
                Ok(Box::new(HealthLogEntryCreated {
                    member_id: MemberId::from_string(required("member_id", &member_id)?),
                    date,
                    occurred_at,
                }))
            }
            TriggerEnvelope::GroupCheckinCreated {
                group_id,
                date,
                member_id,
                energy_level,
            } => {
                if energy_level > GroupCheckIn::MAX_ENERGY_LEVEL {
                    return Err(DomainError::InvalidInput(format!(
                        "energy_level must be at most {}, got {}",
                        GroupCheckIn::MAX_ENERGY_LEVEL,
                        energy_level
                    )));
                }
                Ok(Box::new(GroupCheckInCreated {
                    group_id: GroupId::from_string(required("group_id", &group_id)?),
                    date,
                    member_id: MemberId::from_string(required("member_id", &member_id)?),
                    energy_level,
                    occurred_at,
                }))
            }
        }
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntakeSummary {
    pub published: usize,
    pub skipped: usize,
}

/// Read envelopes until end of input, publishing each one.
///
/// Only an I/O failure on the reader ends the loop early.
pub async fn run_intake<R>(reader: R, event_bus: &dyn EventBus) -> std::io::Result<IntakeSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = IntakeSummary::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = TriggerEnvelope::parse(line).and_then(|e| e.into_event(Utc::now()));
        let result = match event {
            Ok(event) => event_bus.publish(event).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => summary.published += 1,
            Err(e) => {
                let response = ErrorResponse::from(e);
                warn!("Skipping trigger on line {}: {}", line_no, response);
                summary.skipped += 1;
            }
        }
    }

    info!(
        "Trigger intake finished: {} published, {} skipped",
        summary.published, summary.skipped
    );

    Ok(summary)
}
