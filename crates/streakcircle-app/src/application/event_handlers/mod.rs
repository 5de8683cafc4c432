mod streak_trigger_handler;

pub use streak_trigger_handler::StreakTriggerHandler;
