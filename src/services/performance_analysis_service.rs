use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    canonical_muscle_group, ExerciseEntry, PerformanceAnalysis, ProgressSuggestion,
    WorkoutRecord, REFERENCE_MUSCLE_GROUPS,
};
use crate::services::metrics::{average_one_decimal, round_one_decimal};
use crate::storage::WorkoutStore;

/// Days of history the analysis looks back over.
pub const ANALYSIS_WINDOW_DAYS: i64 = 30;

/// Distinct exercises that get an overload suggestion, most recent first.
pub const SUGGESTION_LIMIT: usize = 5;
const SUGGESTION_WEIGHT_RATE: Decimal = dec!(1.05);
const SUGGESTION_REASON: &str = "5% weight increase for progressive overload";

const UNDERTRAINED_RATIO: f64 = 0.5;
const OVERTRAINED_RATIO: f64 = 1.5;

/// Summarises a user's recent training: volume per muscle group, imbalances and
/// progressive overload suggestions.
#[derive(Clone)]
pub struct PerformanceAnalysisService {
    store: Arc<dyn WorkoutStore>,
}

impl PerformanceAnalysisService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    pub async fn analyze_performance(&self, user_id: Uuid) -> Result<PerformanceAnalysis> {
        self.analyze_performance_at(user_id, Utc::now()).await
    }

    /// Same as [`Self::analyze_performance`] with an explicit clock.
    pub async fn analyze_performance_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<PerformanceAnalysis> {
        info!("Analyzing performance for user {}", user_id);

        let since = now - Duration::days(ANALYSIS_WINDOW_DAYS);
        let workouts = self.store.list_completed_workouts(user_id, Some(since)).await?;
        let latest_weighted = self
            .store
            .latest_weighted_entries(user_id, SUGGESTION_LIMIT)
            .await?;

        let analysis = summarize_performance(&workouts, &latest_weighted);
        debug!(
            "User {} trained {} times, undertrained: {:?}",
            user_id, analysis.total_workouts_last_30_days, analysis.undertrained_muscles
        );

        Ok(analysis)
    }
}

/// Builds the analysis from already-fetched data.
pub fn summarize_performance(
    workouts: &[WorkoutRecord],
    latest_weighted: &[ExerciseEntry],
) -> PerformanceAnalysis {
    let muscle_group_frequency = muscle_group_frequency(workouts);
    let (undertrained_muscles, overtrained_muscles) = classify_muscle_groups(&muscle_group_frequency);

    PerformanceAnalysis {
        total_workouts_last_30_days: workouts.len(),
        average_workout_duration: average_duration_minutes(workouts),
        recommended_focus: recommended_focus(&undertrained_muscles),
        suggestions: progress_suggestions(latest_weighted),
        muscle_group_frequency,
        undertrained_muscles,
        overtrained_muscles,
    }
}

/// Entry count per resolved muscle group. Entries without a group are skipped.
pub fn muscle_group_frequency(workouts: &[WorkoutRecord]) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();

    for group in workouts
        .iter()
        .flat_map(|workout| workout.exercises.iter())
        .filter_map(|entry| entry.muscle_group.as_deref())
        .filter(|group| !group.trim().is_empty())
    {
        *frequency.entry(canonical_muscle_group(group)).or_insert(0) += 1;
    }

    frequency
}

/// Splits muscle groups into `(undertrained, overtrained)` relative to the mean count.
///
/// Undertrained only ever contains reference groups, in reference order; a reference
/// group nobody trained is undertrained. Overtrained is in name order.
pub fn classify_muscle_groups(frequency: &BTreeMap<String, usize>) -> (Vec<String>, Vec<String>) {
    let average = if frequency.is_empty() {
        0.0
    } else {
        frequency.values().sum::<usize>() as f64 / frequency.len() as f64
    };

    let undertrained = REFERENCE_MUSCLE_GROUPS
        .iter()
        .filter(|group| {
            frequency
                .get(**group)
                .map_or(true, |count| (*count as f64) < average * UNDERTRAINED_RATIO)
        })
        .map(|group| (*group).to_string())
        .collect();

    let overtrained = frequency
        .iter()
        .filter(|(_, count)| (**count as f64) > average * OVERTRAINED_RATIO)
        .map(|(group, _)| group.clone())
        .collect();

    (undertrained, overtrained)
}

fn average_duration_minutes(workouts: &[WorkoutRecord]) -> Decimal {
    let total: i64 = workouts
        .iter()
        .map(|workout| workout.duration_minutes().unwrap_or(0))
        .sum();
    average_one_decimal(total, workouts.len())
}

fn progress_suggestions(latest_weighted: &[ExerciseEntry]) -> Vec<ProgressSuggestion> {
    latest_weighted
        .iter()
        .filter_map(|entry| {
            let weight = entry.weight?;
            Some(ProgressSuggestion {
                exercise_name: entry.name.clone(),
                last_weight: Some(weight),
                last_reps: entry.reps,
                suggested_weight: Some(round_one_decimal(weight * SUGGESTION_WEIGHT_RATE)),
                suggested_reps: entry.reps,
                reason: SUGGESTION_REASON.to_string(),
            })
        })
        .take(SUGGESTION_LIMIT)
        .collect()
}

fn recommended_focus(undertrained: &[String]) -> String {
    if undertrained.is_empty() {
        "You are following a balanced program!".to_string()
    } else {
        format!("Undertrained muscle groups: {}", undertrained.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frequency(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs
            .iter()
            .map(|(group, count)| ((*group).to_string(), *count))
            .collect()
    }

    #[test]
    fn test_empty_history_marks_every_reference_group_undertrained() {
        let (under, over) = classify_muscle_groups(&BTreeMap::new());
        assert_eq!(under, REFERENCE_MUSCLE_GROUPS.to_vec());
        assert!(over.is_empty());
    }

    #[test]
    fn test_classify_against_average() {
        // average = 30 / 6 = 5: under < 2.5, over > 7.5
        let freq = frequency(&[
            ("Chest", 10),
            ("Back", 6),
            ("Legs", 2),
            ("Shoulders", 5),
            ("Arms", 5),
            ("Core", 2),
        ]);

        let (under, over) = classify_muscle_groups(&freq);
        assert_eq!(under, vec!["Legs".to_string(), "Core".to_string()]);
        assert_eq!(over, vec!["Chest".to_string()]);
    }

    #[test]
    fn test_non_reference_groups_count_toward_average_only() {
        let freq = frequency(&[("Calves", 12), ("Chest", 1)]);

        let (under, over) = classify_muscle_groups(&freq);
        assert!(under.contains(&"Chest".to_string()));
        assert!(!under.contains(&"Calves".to_string()));
        assert_eq!(over, vec!["Calves".to_string()]);
    }

    #[test]
    fn test_recommended_focus_messages() {
        assert_eq!(recommended_focus(&[]), "You are following a balanced program!");
        assert_eq!(
            recommended_focus(&["Legs".to_string(), "Core".to_string()]),
            "Undertrained muscle groups: Legs, Core"
        );
    }
}
