use chrono::NaiveDate;
use futures::future::join_all;
use log::{debug, warn};
use std::sync::Arc;

use streakcircle_domain::group::GroupRepository;
use streakcircle_domain::shared::{GroupId, MemberId};

use super::ActivitySignalProbe;

/// Decides whether every member of a group was active on a date
pub struct GroupActivityAggregator {
    group_repo: Arc<dyn GroupRepository>,
    probe: Arc<ActivitySignalProbe>,
}

impl GroupActivityAggregator {
    pub fn new(group_repo: Arc<dyn GroupRepository>, probe: Arc<ActivitySignalProbe>) -> Self {
        Self { group_repo, probe }
    }

    /// A missing, unreadable or empty group is never "all active".
    pub async fn all_active(&self, group_id: &GroupId, date: NaiveDate) -> bool {
        match self.group_repo.find_by_id(group_id).await {
            Ok(Some(group)) => self.all_members_active(group.members(), date).await,
            Ok(None) => {
                debug!("Group {} not found, treating as inactive", group_id);
                false
            }
            Err(e) => {
                warn!(
                    "Failed to load members of group {}: {}",
                    group_id,
                    e.format_with_code()
                );
                false
            }
        }
    }

    /// Checks all members concurrently and waits for every answer.
    pub async fn all_members_active(&self, members: &[MemberId], date: NaiveDate) -> bool {
        if members.is_empty() {
            return false;
        }

        let probes = members
            .iter()
            .map(|member_id| self.probe.has_activity(member_id, date));
        let results = join_all(probes).await;

        let active = results.iter().filter(|active| **active).count();
        debug!("{}/{} members active on {}", active, members.len(), date);

        active == members.len()
    }
}
