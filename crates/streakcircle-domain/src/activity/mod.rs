mod records;
mod repository;
mod signal;

pub use records::{utc_day_bounds, GroupCheckIn, HabitCompletion, HealthLogEntry};
pub use repository::{GroupCheckInRepository, HabitCompletionRepository, HealthLogRepository};
pub use signal::{ActivitySignal, ActivitySource};
