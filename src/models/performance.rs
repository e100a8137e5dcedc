use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Thirty-day training summary for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    pub total_workouts_last_30_days: usize,
    pub average_workout_duration: Decimal,
    /// Entry count per muscle group. Ordered by group name for stable output.
    pub muscle_group_frequency: BTreeMap<String, usize>,
    pub undertrained_muscles: Vec<String>,
    pub overtrained_muscles: Vec<String>,
    pub recommended_focus: String,
    pub suggestions: Vec<ProgressSuggestion>,
}

/// Progressive overload proposal for a single exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSuggestion {
    pub exercise_name: String,
    pub last_weight: Option<Decimal>,
    pub last_reps: Option<i32>,
    pub suggested_weight: Option<Decimal>,
    pub suggested_reps: Option<i32>,
    pub reason: String,
}
