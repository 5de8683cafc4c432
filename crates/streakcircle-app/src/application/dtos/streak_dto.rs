use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupStreakDto {
    pub group_id: String,
    pub group_name: String,
    pub member_count: usize,
    pub streak: u32,
    pub last_streak_date: Option<String>, // YYYY-MM-DD
    /// Every member was active today and the credit has been recorded
    pub credited_today: bool,
    /// The streak is alive but still needs today's credit
    pub at_risk: bool,
}
