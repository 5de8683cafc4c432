mod domain_service;
mod value_objects;

pub use domain_service::StreakDomainService;
pub use value_objects::{StreakState, StreakTransition, TransitionKind};
