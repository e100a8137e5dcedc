use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Training goal a weekly plan is built for.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlanGoal {
    Strength,
    Muscle,
    Endurance,
    WeightLoss,
    #[default]
    General,
}

impl PlanGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanGoal::Strength => "strength",
            PlanGoal::Muscle => "muscle",
            PlanGoal::Endurance => "endurance",
            PlanGoal::WeightLoss => "weight_loss",
            PlanGoal::General => "general",
        }
    }

    /// Case-insensitive; anything unrecognised is a general fitness goal.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "strength" => PlanGoal::Strength,
            "muscle" => PlanGoal::Muscle,
            "endurance" => PlanGoal::Endurance,
            "weight_loss" => PlanGoal::WeightLoss,
            _ => PlanGoal::General,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }

    /// Case-insensitive; anything unrecognised is treated as intermediate.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "beginner" => ExperienceLevel::Beginner,
            "advanced" => ExperienceLevel::Advanced,
            _ => ExperienceLevel::Intermediate,
        }
    }
}

/// Body of `POST /api/workout-plan/generate`. Missing fields take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePlanRequest {
    pub days_per_week: Option<i32>,
    pub goal: Option<String>,
    pub level: Option<String>,
}

impl GeneratePlanRequest {
    pub fn new(days_per_week: i32, goal: &str, level: &str) -> Self {
        Self {
            days_per_week: Some(days_per_week),
            goal: Some(goal.to_string()),
            level: Some(level.to_string()),
        }
    }

    pub fn resolved_goal(&self) -> PlanGoal {
        self.goal
            .as_deref()
            .map(PlanGoal::parse_or_default)
            .unwrap_or_default()
    }

    pub fn resolved_level(&self) -> ExperienceLevel {
        self.level
            .as_deref()
            .map(ExperienceLevel::parse_or_default)
            .unwrap_or_default()
    }

    /// Clamped to 2..=6, with 2 raised to 3 since no two-day split exists.
    pub fn resolved_days_per_week(&self) -> usize {
        match self.days_per_week.unwrap_or(3).clamp(2, 6) {
            2 => 3,
            days => days as usize,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub exercise_id: String,
    pub name: String,
    pub muscle_group: String,
    pub recommended_sets: i32,
    pub recommended_reps: i32,
    pub recommended_weight: Option<Decimal>,
    pub recommended_duration_seconds: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub day_number: usize,
    pub day_name: String,
    pub focus: String,
    pub exercises: Vec<PlannedExercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub plan_name: String,
    pub goal: PlanGoal,
    pub level: ExperienceLevel,
    pub total_days: usize,
    pub progress_note: Option<String>,
    pub days: Vec<DailyPlan>,
}

impl WeeklyPlan {
    pub fn day(&self, day_name: &str) -> Option<&DailyPlan> {
        self.days.iter().find(|day| day.day_name == day_name)
    }
}

/// Ready-made plan configuration offered to users who do not want to pick one.
#[derive(Debug, Clone, Serialize)]
pub struct PlanPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub days_per_week: i32,
    pub goal: PlanGoal,
    pub level: ExperienceLevel,
    pub suitable_for: &'static str,
}
