use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::ProfileStats;

pub const HEIGHT_RANGE_CM: RangeInclusive<Decimal> = dec!(50)..=dec!(300);
pub const WEIGHT_RANGE_KG: RangeInclusive<Decimal> = dec!(20)..=dec!(500);
pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "active" => Some(ActivityLevel::Active),
            "very_active" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    /// Multiplier applied to the basal metabolic rate.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Long-term goal stored on the profile. Not the same vocabulary as plan goals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Maintain,
    Endurance,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "weight_loss",
            FitnessGoal::MuscleGain => "muscle_gain",
            FitnessGoal::Maintain => "maintain",
            FitnessGoal::Endurance => "endurance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weight_loss" => Some(FitnessGoal::WeightLoss),
            "muscle_gain" => Some(FitnessGoal::MuscleGain),
            "maintain" => Some(FitnessGoal::Maintain),
            "endurance" => Some(FitnessGoal::Endurance),
            _ => None,
        }
    }
}

/// Account profile with the body and lifestyle data used for health metrics.
/// Everything except the id is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub height_cm: Option<Decimal>,
    pub weight_kg: Option<Decimal>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub fitness_goal: Option<FitnessGoal>,
    pub activity_level: Option<ActivityLevel>,
    pub profile_image_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row shape of the `users` table columns the planner reads and writes.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub height_cm: Option<Decimal>,
    pub weight_kg: Option<Decimal>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub fitness_goal: Option<String>,
    pub activity_level: Option<String>,
    pub profile_image_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        Self {
            user_id: row.id,
            email: row.email,
            name: row.name,
            height_cm: row.height_cm,
            weight_kg: row.weight_kg,
            gender: row.gender.as_deref().and_then(Gender::parse),
            date_of_birth: row.date_of_birth,
            fitness_goal: row.fitness_goal.as_deref().and_then(FitnessGoal::parse),
            activity_level: row.activity_level.as_deref().and_then(ActivityLevel::parse),
            profile_image_url: row.profile_image_url,
            updated_at: row.updated_at,
        }
    }
}

/// Body of `PUT /api/profile`. Only the fields present are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub height_cm: Option<Decimal>,
    pub weight_kg: Option<Decimal>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub fitness_goal: Option<String>,
    pub activity_level: Option<String>,
    pub profile_image_url: Option<String>,
}

impl UpdateProfileRequest {
    /// Copies the present fields onto `profile`. Unrecognised enum values clear the
    /// stored value instead of being rejected.
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = Some(name);
        }
        if let Some(height_cm) = self.height_cm {
            profile.height_cm = Some(height_cm);
        }
        if let Some(weight_kg) = self.weight_kg {
            profile.weight_kg = Some(weight_kg);
        }
        if let Some(gender) = self.gender {
            profile.gender = Gender::parse(&gender);
        }
        if let Some(date_of_birth) = self.date_of_birth {
            profile.date_of_birth = Some(date_of_birth);
        }
        if let Some(goal) = self.fitness_goal {
            profile.fitness_goal = FitnessGoal::parse(&goal);
        }
        if let Some(level) = self.activity_level {
            profile.activity_level = ActivityLevel::parse(&level);
        }
        if let Some(url) = self.profile_image_url {
            profile.profile_image_url = Some(url);
        }
    }
}

/// Profile together with its lifetime training stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOverview {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub stats: ProfileStats,
}

/// Response of `POST /api/profile/log-weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedWeight {
    pub message: String,
    pub weight: Decimal,
    pub bmi: Option<Decimal>,
    pub bmi_category: Option<String>,
}

/// Derived health figures for a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub bmi: Option<Decimal>,
    pub bmi_category: Option<String>,
    pub estimated_daily_calories: Option<i32>,
    pub age: Option<i32>,
}
