mod profile;
mod repository;

pub use profile::MemberProfile;
pub use repository::MemberProfileRepository;
