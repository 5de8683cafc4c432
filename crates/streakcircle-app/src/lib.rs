// Application layer - streak engine services, trigger adapters and queries
// Presentation layer - wiring and the command-line surface

pub mod application;
pub mod presentation;
