use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Single-connection in-memory database with the schema applied.
///
/// One connection only: every new `:memory:` connection is a fresh database.
#[allow(dead_code)]
pub async fn setup_in_memory_db() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("parse in-memory url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    pool
}

#[allow(dead_code)]
pub async fn insert_legacy_check_in_day(
    pool: &SqlitePool,
    group_id: &str,
    date: &str,
    member_ids_json: &str,
) {
    sqlx::query(
        "INSERT INTO group_check_in_days (group_id, check_in_date, member_ids) VALUES (?1, ?2, ?3)",
    )
    .bind(group_id)
    .bind(date)
    .bind(member_ids_json)
    .execute(pool)
    .await
    .expect("insert legacy check-in day");
}
