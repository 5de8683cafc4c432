mod config_service;
pub mod streak;

pub use config_service::{AppConfig, ConfigService, LogLevel};
pub use streak::{
    ActivitySignalProbe, EvaluationOutcome, GroupActivityAggregator, StreakUpdateCoordinator,
};
