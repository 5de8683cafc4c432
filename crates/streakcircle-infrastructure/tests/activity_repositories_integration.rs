use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use streakcircle_domain::activity::{
    utc_day_bounds, GroupCheckIn, GroupCheckInRepository, HabitCompletion,
    HabitCompletionRepository, HealthLogEntry, HealthLogRepository,
};
use streakcircle_domain::shared::{DomainError, GroupId, HabitId, MemberId};
use streakcircle_infrastructure::persistence::repositories::{
    SqliteGroupCheckInRepository, SqliteHabitCompletionRepository, SqliteHealthLogRepository,
};

mod test_helpers;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn habit_completion_day_bounds_are_inclusive() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteHabitCompletionRepository::new(Arc::new(pool));
    let member = MemberId::from_string("a");

    let (start, end) = utc_day_bounds(date(2024, 1, 10));

    // Last millisecond of the day counts
    let late = HabitCompletion::new(
        "late".to_string(),
        member.clone(),
        HabitId::from_string("stretch"),
        end,
    )
    .unwrap();
    repo.save(&late).await.expect("save completion");

    assert!(repo
        .exists_for_member_between(&member, start, end)
        .await
        .unwrap());

    // The next day does not see it
    let (next_start, next_end) = utc_day_bounds(date(2024, 1, 11));
    assert!(!repo
        .exists_for_member_between(&member, next_start, next_end)
        .await
        .unwrap());
}

#[tokio::test]
async fn habit_completion_sub_millisecond_part_is_truncated() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteHabitCompletionRepository::new(Arc::new(pool));
    let member = MemberId::from_string("a");

    let (start, end) = utc_day_bounds(date(2024, 1, 10));
    let at = end + Duration::microseconds(500);
    repo.save(
        &HabitCompletion::new(
            "c1".to_string(),
            member.clone(),
            HabitId::from_string("read"),
            at,
        )
        .unwrap(),
    )
    .await
    .unwrap();

    assert!(repo
        .exists_for_member_between(&member, start, end)
        .await
        .unwrap());
}

#[tokio::test]
async fn habit_completion_just_after_midnight_belongs_to_next_day() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteHabitCompletionRepository::new(Arc::new(pool));
    let member = MemberId::from_string("a");

    let just_after = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap() + Duration::milliseconds(1);
    repo.save(
        &HabitCompletion::new(
            "c1".to_string(),
            member.clone(),
            HabitId::from_string("read"),
            just_after,
        )
        .unwrap(),
    )
    .await
    .unwrap();

    let (start, end) = utc_day_bounds(date(2024, 1, 10));
    assert!(!repo
        .exists_for_member_between(&member, start, end)
        .await
        .unwrap());

    // Other members never match
    let (start, end) = utc_day_bounds(date(2024, 1, 11));
    assert!(!repo
        .exists_for_member_between(&MemberId::from_string("b"), start, end)
        .await
        .unwrap());
    assert!(repo
        .exists_for_member_between(&member, start, end)
        .await
        .unwrap());
}

#[tokio::test]
async fn health_log_matches_exact_date_only() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteHealthLogRepository::new(Arc::new(pool));
    let member = MemberId::from_string("a");

    let entry = HealthLogEntry::new(
        "h1".to_string(),
        member.clone(),
        date(2024, 1, 10),
        "water".to_string(),
        Utc::now(),
    )
    .unwrap();
    repo.save(&entry).await.expect("save entry");

    assert!(repo.has_entry_on(&member, date(2024, 1, 10)).await.unwrap());
    assert!(!repo.has_entry_on(&member, date(2024, 1, 9)).await.unwrap());
    assert!(!repo
        .has_entry_on(&MemberId::from_string("b"), date(2024, 1, 10))
        .await
        .unwrap());
}

#[tokio::test]
async fn group_check_in_entry_shape() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteGroupCheckInRepository::new(Arc::new(pool));
    let group = GroupId::from_string("g1");
    let member = MemberId::from_string("a");

    let check_in =
        GroupCheckIn::new(group.clone(), date(2024, 1, 10), member.clone(), 4, Utc::now())
            .unwrap();
    repo.save(&check_in).await.expect("save check-in");
    // Saving twice updates in place
    repo.save(&check_in).await.expect("save check-in again");

    assert!(repo
        .has_entry(&group, date(2024, 1, 10), &member)
        .await
        .unwrap());
    assert!(!repo
        .has_entry(&group, date(2024, 1, 11), &member)
        .await
        .unwrap());
    // New-shape writes never appear in the legacy shape
    assert!(!repo
        .has_legacy_entry(&group, date(2024, 1, 10), &member)
        .await
        .unwrap());
}

#[tokio::test]
async fn group_check_in_legacy_day_document() {
    let pool = test_helpers::setup_in_memory_db().await;
    test_helpers::insert_legacy_check_in_day(&pool, "g1", "2024-01-10", r#"["a","c"]"#).await;
    let repo = SqliteGroupCheckInRepository::new(Arc::new(pool));
    let group = GroupId::from_string("g1");

    assert!(repo
        .has_legacy_entry(&group, date(2024, 1, 10), &MemberId::from_string("a"))
        .await
        .unwrap());
    assert!(!repo
        .has_legacy_entry(&group, date(2024, 1, 10), &MemberId::from_string("b"))
        .await
        .unwrap());
    assert!(!repo
        .has_entry(&group, date(2024, 1, 10), &MemberId::from_string("a"))
        .await
        .unwrap());
}

#[tokio::test]
async fn group_check_in_malformed_legacy_document_is_an_error() {
    let pool = test_helpers::setup_in_memory_db().await;
    test_helpers::insert_legacy_check_in_day(&pool, "g1", "2024-01-10", "a,c").await;
    let repo = SqliteGroupCheckInRepository::new(Arc::new(pool));

    let result = repo
        .has_legacy_entry(
            &GroupId::from_string("g1"),
            date(2024, 1, 10),
            &MemberId::from_string("a"),
        )
        .await;

    assert!(matches!(result, Err(DomainError::DataIntegrity(_))));
}
