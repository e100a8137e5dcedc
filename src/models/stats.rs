use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub total_workouts: usize,
    pub total_minutes: i64,
    /// Consecutive training days ending today or yesterday.
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_workout_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_workouts: usize,
    pub total_minutes: i64,
    pub total_exercises: usize,
    pub average_workout_minutes: Decimal,
    pub weekly_stats: Vec<WeeklyStats>,
    pub muscle_group_stats: Vec<MuscleGroupStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Monday of the week, `YYYY-MM-DD`.
    pub week_start: String,
    pub workout_count: usize,
    pub total_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupStats {
    pub muscle_group: String,
    pub exercise_count: usize,
}

/// Query parameters of `GET /api/stats/progress`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressStatsQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
