use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    HealthMetrics, LoggedWeight, ProfileOverview, ProfileStats, UpdateProfileRequest,
    UserProfile, WorkoutRecord,
};
use crate::services::metrics::{bmi, bmi_category, health_metrics, streaks};
use crate::storage::WorkoutStore;

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn WorkoutStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// BMI, calorie and age figures for the user. `None` when the user does not exist.
    pub async fn compute_health_metrics(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<HealthMetrics>> {
        let profile = self.store.get_user_profile(user_id).await?;
        Ok(profile.map(|profile| health_metrics(&profile, now)))
    }

    /// Profile with lifetime stats. `None` when the user does not exist.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileOverview>> {
        let Some(profile) = self.store.get_user_profile(user_id).await? else {
            return Ok(None);
        };
        self.overview(profile, Utc::now()).await.map(Some)
    }

    /// Applies a partial update. `None` when the user does not exist.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
        now: DateTime<Utc>,
    ) -> Result<Option<ProfileOverview>> {
        let Some(mut profile) = self.store.get_user_profile(user_id).await? else {
            return Ok(None);
        };

        request.apply_to(&mut profile);
        profile.updated_at = Some(now);
        if !self.store.update_user_profile(&profile).await? {
            return Ok(None);
        }
        info!("Updated profile of user {}", user_id);

        self.overview(profile, now).await.map(Some)
    }

    /// Records a new body weight. `None` when the user does not exist.
    pub async fn log_weight(
        &self,
        user_id: Uuid,
        weight: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Option<LoggedWeight>> {
        let Some(mut profile) = self.store.get_user_profile(user_id).await? else {
            return Ok(None);
        };

        profile.weight_kg = Some(weight);
        profile.updated_at = Some(now);
        if !self.store.update_user_profile(&profile).await? {
            return Ok(None);
        }
        info!("User {} logged weight {}kg", user_id, weight);

        let bmi = bmi(profile.height_cm, profile.weight_kg);
        Ok(Some(LoggedWeight {
            message: "Weight logged".to_string(),
            weight,
            bmi,
            bmi_category: bmi_category(bmi).map(str::to_string),
        }))
    }

    async fn overview(&self, profile: UserProfile, now: DateTime<Utc>) -> Result<ProfileOverview> {
        let stats = self.compute_profile_stats_at(profile.user_id, now).await?;
        Ok(ProfileOverview { profile, stats })
    }

    pub async fn compute_profile_stats(&self, user_id: Uuid) -> Result<ProfileStats> {
        self.compute_profile_stats_at(user_id, Utc::now()).await
    }

    pub async fn compute_profile_stats_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ProfileStats> {
        info!("Computing profile stats for user {}", user_id);

        let workouts = self.store.list_completed_workouts(user_id, None).await?;
        Ok(profile_stats(&workouts, now))
    }
}

/// Lifetime totals and streaks over completed workouts.
pub fn profile_stats(workouts: &[WorkoutRecord], now: DateTime<Utc>) -> ProfileStats {
    let (current_streak, longest_streak) = streaks(
        workouts.iter().map(|workout| workout.started_at.date_naive()),
        now.date_naive(),
    );

    ProfileStats {
        total_workouts: workouts.len(),
        total_minutes: workouts
            .iter()
            .filter_map(WorkoutRecord::duration_minutes)
            .sum(),
        current_streak,
        longest_streak,
        last_workout_date: workouts.iter().map(|workout| workout.started_at).max(),
    }
}
