use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

use crate::application::queries::GroupStreakQueries;
use crate::application::services::{
    ActivitySignalProbe, GroupActivityAggregator, StreakUpdateCoordinator,
};
use streakcircle_domain::activity::{
    GroupCheckInRepository, HabitCompletionRepository, HealthLogRepository,
};
use streakcircle_domain::events::EventBus;
use streakcircle_domain::group::GroupRepository;
use streakcircle_domain::member::MemberProfileRepository;
use streakcircle_domain::shared::Clock;
use streakcircle_infrastructure::persistence::Database;

pub struct Runtime {
    pub pool: Arc<SqlitePool>,
    pub db: Arc<Database>,
    pub event_bus: Arc<dyn EventBus>,
    pub clock: Arc<dyn Clock>,
}

pub struct Repositories {
    pub group: Arc<dyn GroupRepository>,
    pub member_profile: Arc<dyn MemberProfileRepository>,
    pub habit_completion: Arc<dyn HabitCompletionRepository>,
    pub health_log: Arc<dyn HealthLogRepository>,
    pub group_check_in: Arc<dyn GroupCheckInRepository>,
}

pub struct Services {
    pub probe: Arc<ActivitySignalProbe>,
    pub aggregator: Arc<GroupActivityAggregator>,
    pub coordinator: Arc<StreakUpdateCoordinator>,
}

pub struct Queries {
    pub group_streak: Arc<GroupStreakQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub queries: Queries,
}

impl AppState {
    pub async fn new(db_path: &Path) -> anyhow::Result<Self> {
        crate::presentation::bootstrap::build_app_state(db_path).await
    }
}
