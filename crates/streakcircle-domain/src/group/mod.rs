mod aggregate;
mod repository;


pub use aggregate::Group;
pub use repository::GroupRepository;
