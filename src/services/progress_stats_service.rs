use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    MuscleGroupStats, ProgressStats, ProgressStatsQuery, WeeklyStats, WorkoutRecord,
};
use crate::services::metrics::average_one_decimal;
use crate::services::performance_analysis_service::{muscle_group_frequency, ANALYSIS_WINDOW_DAYS};
use crate::storage::WorkoutStore;

/// Training volume over a date range, bucketed by week and muscle group.
#[derive(Clone)]
pub struct ProgressStatsService {
    store: Arc<dyn WorkoutStore>,
}

impl ProgressStatsService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Stats for workouts started within `[from, to]`, defaulting to the last 30 days.
    pub async fn compute_progress_stats(
        &self,
        user_id: Uuid,
        query: &ProgressStatsQuery,
        now: DateTime<Utc>,
    ) -> Result<ProgressStats> {
        let from = query
            .from
            .unwrap_or_else(|| now - Duration::days(ANALYSIS_WINDOW_DAYS));
        let to = query.to.unwrap_or(now);
        info!("Computing progress stats for user {} from {} to {}", user_id, from, to);

        let mut workouts: Vec<WorkoutRecord> = self
            .store
            .list_completed_workouts(user_id, Some(from))
            .await?
            .into_iter()
            .filter(|workout| workout.started_at <= to)
            .collect();
        workouts.sort_by_key(|workout| workout.started_at);

        Ok(progress_stats(&workouts))
    }
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn progress_stats(workouts: &[WorkoutRecord]) -> ProgressStats {
    let minutes = |workout: &WorkoutRecord| workout.duration_minutes().unwrap_or(0);

    let total_workouts = workouts.len();
    let total_minutes: i64 = workouts.iter().map(minutes).sum();
    let average_workout_minutes = average_one_decimal(total_minutes, total_workouts);

    let mut weeks: BTreeMap<NaiveDate, (usize, i64)> = BTreeMap::new();
    for workout in workouts {
        let bucket = weeks
            .entry(week_start(workout.started_at.date_naive()))
            .or_default();
        bucket.0 += 1;
        bucket.1 += minutes(workout);
    }

    let weekly_stats = weeks
        .into_iter()
        .map(|(week, (workout_count, total_minutes))| WeeklyStats {
            week_start: week.format("%Y-%m-%d").to_string(),
            workout_count,
            total_minutes,
        })
        .collect();

    let mut muscle_group_stats: Vec<MuscleGroupStats> = muscle_group_frequency(workouts)
        .into_iter()
        .map(|(muscle_group, exercise_count)| MuscleGroupStats {
            muscle_group,
            exercise_count,
        })
        .collect();
    muscle_group_stats.sort_by(|a, b| b.exercise_count.cmp(&a.exercise_count));

    ProgressStats {
        total_workouts,
        total_minutes,
        total_exercises: workouts.iter().map(|workout| workout.exercises.len()).sum(),
        average_workout_minutes,
        weekly_stats,
        muscle_group_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_week_start_is_monday() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();

        assert_eq!(week_start(wednesday), monday);
        assert_eq!(week_start(monday), monday);
        assert_eq!(week_start(sunday), monday);
    }

    #[test]
    fn test_empty_range() {
        let stats = progress_stats(&[]);
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.average_workout_minutes, Decimal::ZERO);
        assert!(stats.weekly_stats.is_empty());
        assert!(stats.muscle_group_stats.is_empty());
    }
}
