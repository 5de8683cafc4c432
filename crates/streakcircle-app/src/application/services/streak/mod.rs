mod activity_probe;
mod coordinator;
mod group_aggregator;

#[cfg(test)]
pub(crate) mod fakes;

pub use activity_probe::ActivitySignalProbe;
pub use coordinator::{EvaluationOutcome, StreakUpdateCoordinator};
pub use group_aggregator::GroupActivityAggregator;
