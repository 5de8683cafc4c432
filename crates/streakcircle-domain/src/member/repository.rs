use async_trait::async_trait;

use super::MemberProfile;
use crate::shared::{DomainError, MemberId};

#[async_trait]
pub trait MemberProfileRepository: Send + Sync {
    async fn save(&self, profile: &MemberProfile) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<MemberProfile>, DomainError>;
}
