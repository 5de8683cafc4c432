pub mod group_check_in_repo;
pub mod group_repo;
pub mod habit_completion_repo;
pub mod health_log_repo;
pub mod member_profile_repo;

pub use group_check_in_repo::SqliteGroupCheckInRepository;
pub use group_repo::SqliteGroupRepository;
pub use habit_completion_repo::SqliteHabitCompletionRepository;
pub use health_log_repo::SqliteHealthLogRepository;
pub use member_profile_repo::SqliteMemberProfileRepository;
