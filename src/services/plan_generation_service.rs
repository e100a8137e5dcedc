use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    same_muscle_group, CatalogExercise, DailyPlan, ExerciseEntry, ExperienceLevel,
    GeneratePlanRequest, PerformanceAnalysis, PlanGoal, PlanPreset, PlannedExercise, WeeklyPlan,
};
use crate::services::metrics::round_one_decimal;
use crate::services::templates::{
    adjust_volume, exercise_count_for_goal, exercise_templates, overload_rate, plan_name,
    split_program, ExerciseTemplate, PLAN_PRESETS,
};
use crate::services::PerformanceAnalysisService;
use crate::storage::WorkoutStore;

/// Workouts in the analysis window below which consistency is called out.
const CONSISTENT_WORKOUTS_PER_MONTH: usize = 8;

const FIRST_TIME_NOTE: &str = "First time doing this exercise, start light";

/// Builds weekly training plans from split templates and the user's own history.
#[derive(Clone)]
pub struct PlanGenerationService {
    store: Arc<dyn WorkoutStore>,
    performance_service: PerformanceAnalysisService,
}

impl PlanGenerationService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        let performance_service = PerformanceAnalysisService::new(store.clone());

        Self {
            store,
            performance_service,
        }
    }

    pub async fn generate_weekly_plan(
        &self,
        user_id: Uuid,
        request: &GeneratePlanRequest,
    ) -> Result<WeeklyPlan> {
        self.generate_weekly_plan_at(user_id, request, Utc::now()).await
    }

    /// Same as [`Self::generate_weekly_plan`] with an explicit clock.
    pub async fn generate_weekly_plan_at(
        &self,
        user_id: Uuid,
        request: &GeneratePlanRequest,
        now: DateTime<Utc>,
    ) -> Result<WeeklyPlan> {
        let goal = request.resolved_goal();
        let level = request.resolved_level();
        let days_per_week = request.resolved_days_per_week();
        info!(
            "Generating {}-day {} plan ({}) for user {}",
            days_per_week,
            goal.as_str(),
            level.as_str(),
            user_id
        );

        let program = split_program(days_per_week)
            .ok_or_else(|| anyhow!("No split program for {} days per week", days_per_week))?;
        let analysis = self
            .performance_service
            .analyze_performance_at(user_id, now)
            .await?;
        let catalog = self.store.list_catalog_exercises().await?;

        let mut days = Vec::with_capacity(program.len());
        for (index, split_day) in program.iter().enumerate() {
            let mut exercises = Vec::new();

            for muscle_group in split_day.muscle_groups {
                let templates = exercise_templates(muscle_group);
                for template in templates.iter().take(exercise_count_for_goal(goal)) {
                    let last_performance = self
                        .store
                        .last_exercise_entry(user_id, template.name)
                        .await?;
                    let exercise_id = resolve_catalog_exercise(&catalog, template.name, muscle_group)
                        .map_or_else(Uuid::new_v4, |exercise| exercise.id);

                    exercises.push(plan_exercise(
                        template,
                        muscle_group,
                        exercise_id,
                        last_performance.as_ref(),
                        goal,
                        level,
                    ));
                }
            }

            debug!("{}: {} exercises", split_day.name, exercises.len());
            days.push(DailyPlan {
                day_number: index + 1,
                day_name: split_day.name.to_string(),
                focus: split_day.muscle_groups.join(" & "),
                exercises,
            });
        }

        Ok(WeeklyPlan {
            plan_name: plan_name(goal, days_per_week),
            goal,
            level,
            total_days: days_per_week,
            progress_note: Some(progress_note(&analysis)),
            days,
        })
    }

    pub fn plan_presets(&self) -> &'static [PlanPreset] {
        PLAN_PRESETS
    }
}

fn plan_exercise(
    template: &ExerciseTemplate,
    muscle_group: &str,
    exercise_id: Uuid,
    last_performance: Option<&ExerciseEntry>,
    goal: PlanGoal,
    level: ExperienceLevel,
) -> PlannedExercise {
    let (sets, reps) = adjust_volume(template.base_sets, template.base_reps, level, goal);
    let recommended_weight = progressive_weight(last_performance, level);

    PlannedExercise {
        exercise_id: exercise_id.to_string(),
        name: template.name.to_string(),
        muscle_group: muscle_group.to_string(),
        recommended_sets: sets,
        recommended_reps: reps,
        recommended_weight,
        recommended_duration_seconds: template.duration_seconds,
        notes: exercise_note(last_performance, recommended_weight),
    }
}

/// Finds the catalog row for a planned exercise.
///
/// A case-insensitive name match wins; otherwise the first exercise of the same muscle
/// group. `catalog` is expected in name order, so ties go to the alphabetically first row.
pub fn resolve_catalog_exercise<'a>(
    catalog: &'a [CatalogExercise],
    name: &str,
    muscle_group: &str,
) -> Option<&'a CatalogExercise> {
    catalog
        .iter()
        .find(|exercise| exercise.name.eq_ignore_ascii_case(name))
        .or_else(|| {
            catalog.iter().find(|exercise| {
                exercise
                    .muscle_group
                    .as_deref()
                    .is_some_and(|group| same_muscle_group(group, muscle_group))
            })
        })
}

/// Next working weight after the last recorded lift, if there was one.
pub fn progressive_weight(
    last_performance: Option<&ExerciseEntry>,
    level: ExperienceLevel,
) -> Option<Decimal> {
    let weight = last_performance?.weight?;
    Some(round_one_decimal(weight * overload_rate(level)))
}

pub fn exercise_note(
    last_performance: Option<&ExerciseEntry>,
    suggested_weight: Option<Decimal>,
) -> Option<String> {
    let Some(last) = last_performance else {
        return Some(FIRST_TIME_NOTE.to_string());
    };

    match (last.weight, suggested_weight) {
        (Some(weight), Some(suggested)) => {
            let reps = last.reps.map_or_else(|| "-".to_string(), |reps| reps.to_string());
            Some(format!(
                "Last: {}kg x {} reps. Suggested increase: +{:.1}kg",
                weight.normalize(),
                reps,
                suggested - weight
            ))
        }
        _ => last
            .reps
            .map(|reps| format!("Last: {} reps, no weight recorded", reps)),
    }
}

/// One-line coaching message about the last 30 days of training.
pub fn progress_note(analysis: &PerformanceAnalysis) -> String {
    let workouts = analysis.total_workouts_last_30_days;

    if workouts == 0 {
        return "No workouts recorded yet. Start with this plan and track your progress!"
            .to_string();
    }

    if workouts < CONSISTENT_WORKOUTS_PER_MONTH {
        return format!(
            "You trained {} times in the last 30 days. Aim for at least 3 workouts a week to stay consistent.",
            workouts
        );
    }

    if !analysis.undertrained_muscles.is_empty() {
        return format!(
            "Great work! Heads up: you could focus more on {}.",
            analysis.undertrained_muscles.join(", ")
        );
    }

    "Excellent progress! You are following a balanced training program.".to_string()
}
