use async_trait::async_trait;

use super::Group;
use crate::shared::{DomainError, GroupId};
use crate::streak::StreakState;

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Save a group with its member list and streak fields.
    ///
    /// Group creation belongs to an external flow; the engine itself only
    /// calls `save_streak`.
    async fn save(&self, group: &Group) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError>;

    /// Overwrite only the streak fields of a group in a single write.
    async fn save_streak(&self, id: &GroupId, state: &StreakState) -> Result<(), DomainError>;
}
