use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::event_handlers::StreakTriggerHandler;
use crate::application::queries::GroupStreakQueries;
use crate::application::services::{
    ActivitySignalProbe, GroupActivityAggregator, StreakUpdateCoordinator,
};
use crate::presentation::state::{AppState, Queries, Repositories, Runtime, Services};
use streakcircle_domain::activity::{
    GroupCheckInRepository, HabitCompletionRepository, HealthLogRepository,
};
use streakcircle_domain::events::activity_events::*;
use streakcircle_domain::events::{EventBus, Subscription};
use streakcircle_domain::group::GroupRepository;
use streakcircle_domain::member::MemberProfileRepository;
use streakcircle_domain::shared::{Clock, SystemClock};
use streakcircle_infrastructure::config::TimeoutConfig;
use streakcircle_infrastructure::events::InMemoryEventBus;
use streakcircle_infrastructure::persistence::{
    repositories::{
        SqliteGroupCheckInRepository, SqliteGroupRepository, SqliteHabitCompletionRepository,
        SqliteHealthLogRepository, SqliteMemberProfileRepository,
    },
    Database, SqliteRepositoryBase,
};

pub async fn build_app_state(db_path: &Path) -> anyhow::Result<AppState> {
    build_app_state_with_clock(db_path, Arc::new(SystemClock)).await
}

/// Wire the engine against the database at `db_path`, reading "today" from
/// `clock`
pub async fn build_app_state_with_clock(
    db_path: &Path,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<AppState> {
    let startup_started_at = Instant::now();

    let db_path_str = db_path.to_str().context("Invalid database path")?;
    info!("Database path: {}", db_path_str);

    // Initialize database
    let started_at = Instant::now();
    let timeouts = TimeoutConfig::global();
    let db = Database::with_timeouts(db_path_str, timeouts).await?;
    info!(
        "✓ Database connected ({}ms)",
        started_at.elapsed().as_millis()
    );

    let started_at = Instant::now();
    db.run_migrations().await?;
    info!(
        "✓ Database migrations complete ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(db.pool().clone());
    let db = Arc::new(db);

    // Initialize repositories
    let started_at = Instant::now();
    let base = || SqliteRepositoryBase::with_timeouts(pool.clone(), timeouts);
    let group_repo: Arc<dyn GroupRepository> =
        Arc::new(SqliteGroupRepository::with_base(base()));
    let member_repo: Arc<dyn MemberProfileRepository> =
        Arc::new(SqliteMemberProfileRepository::with_base(base()));
    let habit_repo: Arc<dyn HabitCompletionRepository> =
        Arc::new(SqliteHabitCompletionRepository::with_base(base()));
    let health_log_repo: Arc<dyn HealthLogRepository> =
        Arc::new(SqliteHealthLogRepository::with_base(base()));
    let check_in_repo: Arc<dyn GroupCheckInRepository> =
        Arc::new(SqliteGroupCheckInRepository::with_base(base()));
    info!(
        "✓ Repositories initialized ({}ms)",
        started_at.elapsed().as_millis()
    );

    // Initialize streak engine
    let probe = Arc::new(ActivitySignalProbe::new(
        habit_repo.clone(),
        health_log_repo.clone(),
        check_in_repo.clone(),
        member_repo.clone(),
    ));
    let aggregator = Arc::new(GroupActivityAggregator::new(
        group_repo.clone(),
        probe.clone(),
    ));
    let coordinator = Arc::new(StreakUpdateCoordinator::new(
        group_repo.clone(),
        member_repo.clone(),
        aggregator.clone(),
        clock.clone(),
    ));

    // Initialize event bus and register trigger adapters
    let started_at = Instant::now();
    let event_bus = Arc::new(InMemoryEventBus::new());
    let trigger_handler = StreakTriggerHandler::new(coordinator.clone(), clock.clone());

    event_bus
        .subscribe(Subscription::<HabitCompletionCreated, _>::shared(
            trigger_handler.clone(),
        ))
        .await;
    event_bus
        .subscribe(Subscription::<HealthLogEntryCreated, _>::shared(
            trigger_handler.clone(),
        ))
        .await;
    event_bus
        .subscribe(Subscription::<GroupCheckInCreated, _>::shared(
            trigger_handler,
        ))
        .await;
    info!(
        "✓ Event bus initialized with streak trigger handlers ({}ms)",
        started_at.elapsed().as_millis()
    );

    let group_streak_queries = Arc::new(GroupStreakQueries::new(
        group_repo.clone(),
        member_repo.clone(),
        clock.clone(),
    ));

    info!(
        "✓ Application state ready ({}ms total)",
        startup_started_at.elapsed().as_millis()
    );

    let event_bus: Arc<dyn EventBus> = event_bus;

    Ok(AppState {
        runtime: Runtime {
            pool,
            db,
            event_bus,
            clock,
        },
        repositories: Repositories {
            group: group_repo,
            member_profile: member_repo,
            habit_completion: habit_repo,
            health_log: health_log_repo,
            group_check_in: check_in_repo,
        },
        services: Services {
            probe,
            aggregator,
            coordinator,
        },
        queries: Queries {
            group_streak: group_streak_queries,
        },
    })
}
