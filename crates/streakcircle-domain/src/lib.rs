// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod activity;
pub mod events;
pub mod group;
pub mod member;
pub mod shared;
pub mod streak;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{DomainError, GroupId, MemberId};
