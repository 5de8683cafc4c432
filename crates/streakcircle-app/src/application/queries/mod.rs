mod group_streak_queries;

pub use group_streak_queries::GroupStreakQueries;
