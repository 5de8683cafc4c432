//! In-memory repositories for exercising the streak engine without SQLite.
//!
//! Every fake counts its lookups and can be switched into a failing mode.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use streakcircle_domain::activity::{
    GroupCheckIn, GroupCheckInRepository, HabitCompletion, HabitCompletionRepository,
    HealthLogEntry, HealthLogRepository,
};
use streakcircle_domain::group::{Group, GroupRepository};
use streakcircle_domain::member::{MemberProfile, MemberProfileRepository};
use streakcircle_domain::shared::{Clock, DomainError, FixedClock, GroupId, MemberId};
use streakcircle_domain::streak::StreakState;

use super::{ActivitySignalProbe, GroupActivityAggregator, StreakUpdateCoordinator};

fn unavailable(what: &str) -> DomainError {
    DomainError::Repository(format!("{what} unavailable"))
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn noon(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
        .and_utc()
}

#[derive(Default)]
pub(crate) struct FakeGroupRepository {
    groups: RwLock<HashMap<String, Group>>,
    pub reads: AtomicUsize,
    pub streak_writes: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FakeGroupRepository {
    pub async fn stored_state(&self, id: &GroupId) -> Option<StreakState> {
        let groups = self.groups.read().await;
        groups.get(id.as_str()).map(|g| g.streak_state())
    }

    pub fn writes(&self) -> usize {
        self.streak_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GroupRepository for FakeGroupRepository {
    async fn save(&self, group: &Group) -> Result<(), DomainError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id().as_str().to_string(), group.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable("groups"));
        }
        let groups = self.groups.read().await;
        Ok(groups.get(id.as_str()).cloned())
    }

    async fn save_streak(&self, id: &GroupId, state: &StreakState) -> Result<(), DomainError> {
        self.streak_writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable("groups"));
        }
        let mut groups = self.groups.write().await;
        match groups.get_mut(id.as_str()) {
            Some(group) => {
                group.record_streak(*state);
                Ok(())
            }
            None => Err(DomainError::GroupNotFound(id.to_string())),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeHabitCompletionRepository {
    // Epoch millis, the precision the SQLite repository keeps
    completions: RwLock<Vec<(MemberId, i64)>>,
    pub calls: AtomicUsize,
    pub failing: AtomicBool,
}

#[async_trait]
impl HabitCompletionRepository for FakeHabitCompletionRepository {
    async fn save(&self, completion: &HabitCompletion) -> Result<(), DomainError> {
        let mut completions = self.completions.write().await;
        completions.push((
            completion.member_id().clone(),
            completion.completed_at().timestamp_millis(),
        ));
        Ok(())
    }

    async fn exists_for_member_between(
        &self,
        member_id: &MemberId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable("habit completions"));
        }
        let (start, end) = (start.timestamp_millis(), end.timestamp_millis());
        let completions = self.completions.read().await;
        Ok(completions
            .iter()
            .any(|(member, at)| member == member_id && (start..=end).contains(at)))
    }
}

#[derive(Default)]
pub(crate) struct FakeHealthLogRepository {
    entries: RwLock<HashSet<(String, NaiveDate)>>,
    pub calls: AtomicUsize,
    pub failing: AtomicBool,
}

#[async_trait]
impl HealthLogRepository for FakeHealthLogRepository {
    async fn save(&self, entry: &HealthLogEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert((entry.member_id().as_str().to_string(), entry.date()));
        Ok(())
    }

    async fn has_entry_on(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> Result<bool, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable("health log"));
        }
        let entries = self.entries.read().await;
        Ok(entries.contains(&(member_id.as_str().to_string(), date)))
    }
}

#[derive(Default)]
pub(crate) struct FakeGroupCheckInRepository {
    entries: RwLock<HashSet<(String, NaiveDate, String)>>,
    legacy_days: RwLock<HashMap<(String, NaiveDate), Vec<String>>>,
    pub entry_calls: AtomicUsize,
    pub legacy_calls: AtomicUsize,
    pub failing: AtomicBool,
}

impl FakeGroupCheckInRepository {
    pub async fn insert_legacy_day(&self, group_id: &GroupId, date: NaiveDate, members: &[&str]) {
        let mut days = self.legacy_days.write().await;
        days.insert(
            (group_id.as_str().to_string(), date),
            members.iter().map(|m| m.to_string()).collect(),
        );
    }

    pub fn calls(&self) -> usize {
        self.entry_calls.load(Ordering::SeqCst) + self.legacy_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GroupCheckInRepository for FakeGroupCheckInRepository {
    async fn save(&self, check_in: &GroupCheckIn) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert((
            check_in.group_id().as_str().to_string(),
            check_in.date(),
            check_in.member_id().as_str().to_string(),
        ));
        Ok(())
    }

    async fn has_entry(
        &self,
        group_id: &GroupId,
        date: NaiveDate,
        member_id: &MemberId,
    ) -> Result<bool, DomainError> {
        self.entry_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable("group check-ins"));
        }
        let entries = self.entries.read().await;
        Ok(entries.contains(&(
            group_id.as_str().to_string(),
            date,
            member_id.as_str().to_string(),
        )))
    }

    async fn has_legacy_entry(
        &self,
        group_id: &GroupId,
        date: NaiveDate,
        member_id: &MemberId,
    ) -> Result<bool, DomainError> {
        self.legacy_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable("group check-in days"));
        }
        let days = self.legacy_days.read().await;
        Ok(days
            .get(&(group_id.as_str().to_string(), date))
            .is_some_and(|members| members.iter().any(|m| m == member_id.as_str())))
    }
}

#[derive(Default)]
pub(crate) struct FakeMemberProfileRepository {
    profiles: RwLock<HashMap<String, MemberProfile>>,
    pub failing: AtomicBool,
}

impl FakeMemberProfileRepository {
    /// Adds the group to the member's profile, creating the profile if needed
    pub async fn join(&self, member_id: &MemberId, group_id: &GroupId) {
        let mut profiles = self.profiles.write().await;
        let mut group_ids = profiles
            .get(member_id.as_str())
            .map(|p| p.group_ids().to_vec())
            .unwrap_or_default();
        group_ids.push(group_id.clone());
        profiles.insert(
            member_id.as_str().to_string(),
            MemberProfile::new(member_id.clone(), member_id.to_string(), group_ids),
        );
    }
}

#[async_trait]
impl MemberProfileRepository for FakeMemberProfileRepository {
    async fn save(&self, profile: &MemberProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.id().as_str().to_string(), profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<MemberProfile>, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable("member profiles"));
        }
        let profiles = self.profiles.read().await;
        Ok(profiles.get(id.as_str()).cloned())
    }
}

/// All fakes wired together around a pinned clock
pub(crate) struct StreakWorld {
    pub groups: Arc<FakeGroupRepository>,
    pub habits: Arc<FakeHabitCompletionRepository>,
    pub health_logs: Arc<FakeHealthLogRepository>,
    pub check_ins: Arc<FakeGroupCheckInRepository>,
    pub members: Arc<FakeMemberProfileRepository>,
    pub clock: Arc<FixedClock>,
}

impl StreakWorld {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            groups: Arc::new(FakeGroupRepository::default()),
            habits: Arc::new(FakeHabitCompletionRepository::default()),
            health_logs: Arc::new(FakeHealthLogRepository::default()),
            check_ins: Arc::new(FakeGroupCheckInRepository::default()),
            members: Arc::new(FakeMemberProfileRepository::default()),
            clock: Arc::new(FixedClock::at_date(today)),
        }
    }

    pub async fn add_group(&self, id: &str, members: &[&str], state: StreakState) -> GroupId {
        let group_id = GroupId::from_string(id);
        let member_ids: Vec<MemberId> = members.iter().map(|m| MemberId::from_string(m)).collect();
        let group = Group::restore(
            group_id.clone(),
            format!("Group {id}"),
            member_ids.clone(),
            state,
            Utc::now(),
        );
        self.groups.save(&group).await.unwrap();
        for member_id in &member_ids {
            self.members.join(member_id, &group_id).await;
        }
        group_id
    }

    pub async fn complete_habit(&self, member: &str, on: NaiveDate) {
        self.complete_habit_at(member, noon(on)).await;
    }

    pub async fn complete_habit_at(&self, member: &str, at: DateTime<Utc>) {
        let completion = HabitCompletion::new(
            format!("{member}-{}", at.timestamp_micros()),
            MemberId::from_string(member),
            streakcircle_domain::shared::HabitId::from_string("walk"),
            at,
        )
        .unwrap();
        self.habits.save(&completion).await.unwrap();
    }

    pub async fn log_health(&self, member: &str, on: NaiveDate) {
        let entry = HealthLogEntry::new(
            format!("{member}-{on}"),
            MemberId::from_string(member),
            on,
            "sleep".to_string(),
            noon(on),
        )
        .unwrap();
        self.health_logs.save(&entry).await.unwrap();
    }

    pub async fn check_in(&self, group_id: &GroupId, member: &str, on: NaiveDate) {
        let check_in =
            GroupCheckIn::new(group_id.clone(), on, MemberId::from_string(member), 3, noon(on))
                .unwrap();
        self.check_ins.save(&check_in).await.unwrap();
    }

    pub fn activity_signals(&self) -> Arc<ActivitySignalProbe> {
        Arc::new(ActivitySignalProbe::new(
            self.habits.clone(),
            self.health_logs.clone(),
            self.check_ins.clone(),
            self.members.clone(),
        ))
    }

    pub fn aggregator(&self) -> Arc<GroupActivityAggregator> {
        Arc::new(GroupActivityAggregator::new(
            self.groups.clone(),
            self.activity_signals(),
        ))
    }

    pub fn coordinator(&self) -> Arc<StreakUpdateCoordinator> {
        let clock: Arc<dyn Clock> = self.clock.clone();
        Arc::new(StreakUpdateCoordinator::new(
            self.groups.clone(),
            self.members.clone(),
            self.aggregator(),
            clock,
        ))
    }
}
