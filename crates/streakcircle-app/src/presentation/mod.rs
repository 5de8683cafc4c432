pub mod bootstrap;
pub mod error;
pub mod state;
pub mod trigger_intake;
