use serde::{Deserialize, Serialize};

use crate::shared::{GroupId, MemberId};

/// The slice of a member's profile the streak engine reads: group memberships
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    id: MemberId,
    display_name: String,
    group_ids: Vec<GroupId>,
}

impl MemberProfile {
    pub fn new(id: MemberId, display_name: String, mut group_ids: Vec<GroupId>) -> Self {
        let mut seen = std::collections::HashSet::new();
        group_ids.retain(|g| seen.insert(g.clone()));

        Self {
            id,
            display_name,
            group_ids,
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn group_ids(&self) -> &[GroupId] {
        &self.group_ids
    }

    pub fn belongs_to(&self, group_id: &GroupId) -> bool {
        self.group_ids.contains(group_id)
    }
}
