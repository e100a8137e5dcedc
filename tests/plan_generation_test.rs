mod common;

use chrono::Duration;
use fitness_planner::models::{ExperienceLevel, GeneratePlanRequest, PlanGoal};
use fitness_planner::services::PlanGenerationService;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{as_dyn, find, reference_now, standard_catalog, store_with_catalog, WorkoutBuilder};

#[tokio::test]
async fn test_strength_plan_builds_on_last_bench_press() {
    let now = reference_now();
    let user_id = Uuid::new_v4();
    let catalog = standard_catalog();
    let bench = find(&catalog, "Bench Press");
    let store = store_with_catalog(&catalog).await;
    store
        .add_workout(
            WorkoutBuilder::new(user_id, now - Duration::days(2))
                .exercise("Bench Press", Some(bench), Some(8), Some(dec!(100.0)))
                .build(),
        )
        .await;

    let service = PlanGenerationService::new(as_dyn(&store));
    let plan = service
        .generate_weekly_plan_at(user_id, &GeneratePlanRequest::new(3, "strength", "intermediate"), now)
        .await
        .unwrap();

    assert_eq!(plan.plan_name, "Güç Programı (Push-Pull-Legs)");
    assert_eq!(plan.goal, PlanGoal::Strength);
    assert_eq!(plan.level, ExperienceLevel::Intermediate);
    assert_eq!(plan.total_days, 3);
    assert_eq!(plan.days.len(), 3);

    let push_day = plan.day("Push Day").expect("push day");
    assert_eq!(push_day.day_number, 1);
    assert_eq!(push_day.focus, "Chest & Shoulders & Arms");

    let bench_plan = push_day
        .exercises
        .iter()
        .find(|exercise| exercise.name == "Bench Press")
        .expect("bench press planned");
    assert_eq!(bench_plan.exercise_id, bench.id.to_string());
    assert_eq!(bench_plan.muscle_group, "Chest");
    assert!(bench_plan.recommended_reps <= 6);
    assert!(bench_plan.recommended_sets >= 4);
    assert_eq!(bench_plan.recommended_weight, Some(dec!(105.0)));

    let note = bench_plan.notes.as_deref().unwrap_or_default();
    assert!(note.contains("100kg x 8"), "unexpected note: {}", note);
    assert!(note.contains("+5.0kg"), "unexpected note: {}", note);

    // One workout in the window is below the consistency threshold.
    let progress = plan.progress_note.unwrap_or_default();
    assert!(progress.starts_with("You trained 1 times"), "unexpected note: {}", progress);
}

#[tokio::test]
async fn test_strength_plan_uses_two_exercises_per_group() {
    let store = store_with_catalog(&standard_catalog()).await;
    let service = PlanGenerationService::new(as_dyn(&store));

    let plan = service
        .generate_weekly_plan_at(
            Uuid::new_v4(),
            &GeneratePlanRequest::new(3, "strength", "beginner"),
            reference_now(),
        )
        .await
        .unwrap();

    let names: Vec<&str> = plan
        .day("Pull Day")
        .expect("pull day")
        .exercises
        .iter()
        .map(|exercise| exercise.name.as_str())
        .collect();
    assert_eq!(names, vec!["Deadlift", "Pull-up", "Bicep Curl", "Tricep Dips"]);
}

#[tokio::test]
async fn test_day_count_is_clamped_to_supported_splits() {
    let store = store_with_catalog(&standard_catalog()).await;
    let service = PlanGenerationService::new(as_dyn(&store));
    let user_id = Uuid::new_v4();
    let now = reference_now();

    let day_names = |plan: &fitness_planner::models::WeeklyPlan| -> Vec<String> {
        plan.days.iter().map(|day| day.day_name.clone()).collect()
    };

    let two = service
        .generate_weekly_plan_at(user_id, &GeneratePlanRequest::new(2, "general", "beginner"), now)
        .await
        .unwrap();
    let three = service
        .generate_weekly_plan_at(user_id, &GeneratePlanRequest::new(3, "general", "beginner"), now)
        .await
        .unwrap();
    assert_eq!(two.total_days, 3);
    assert_eq!(day_names(&two), day_names(&three));

    let zero = service
        .generate_weekly_plan_at(user_id, &GeneratePlanRequest::new(0, "general", "beginner"), now)
        .await
        .unwrap();
    assert_eq!(zero.total_days, 3);

    let nine = service
        .generate_weekly_plan_at(user_id, &GeneratePlanRequest::new(9, "general", "beginner"), now)
        .await
        .unwrap();
    assert_eq!(nine.total_days, 6);
    assert_eq!(nine.days.len(), 6);
    assert_eq!(nine.days[5].day_name, "Leg Day 2");
}

#[tokio::test]
async fn test_missing_fields_take_defaults() {
    let store = store_with_catalog(&standard_catalog()).await;
    let service = PlanGenerationService::new(as_dyn(&store));

    let request = GeneratePlanRequest {
        days_per_week: None,
        goal: Some("yoga".to_string()),
        level: None,
    };
    let plan = service
        .generate_weekly_plan_at(Uuid::new_v4(), &request, reference_now())
        .await
        .unwrap();

    assert_eq!(plan.goal, PlanGoal::General);
    assert_eq!(plan.level, ExperienceLevel::Intermediate);
    assert_eq!(plan.total_days, 3);
    assert_eq!(plan.plan_name, "Genel Fitness Programı (Push-Pull-Legs)");
    assert_eq!(
        plan.progress_note.as_deref(),
        Some("No workouts recorded yet. Start with this plan and track your progress!")
    );
}

#[tokio::test]
async fn test_catalog_resolution_falls_back_to_muscle_group_then_fresh_id() {
    let incline = common::catalog_exercise("Incline Bench", "chest");
    let store = store_with_catalog(std::slice::from_ref(&incline)).await;
    let service = PlanGenerationService::new(as_dyn(&store));

    let plan = service
        .generate_weekly_plan_at(
            Uuid::new_v4(),
            &GeneratePlanRequest::new(3, "muscle", "intermediate"),
            reference_now(),
        )
        .await
        .unwrap();

    let push_day = plan.day("Push Day").expect("push day");
    for exercise in push_day.exercises.iter().filter(|e| e.muscle_group == "Chest") {
        assert_eq!(exercise.exercise_id, incline.id.to_string());
    }

    let leg_ids: Vec<Uuid> = plan
        .day("Leg Day")
        .expect("leg day")
        .exercises
        .iter()
        .map(|exercise| Uuid::parse_str(&exercise.exercise_id).unwrap())
        .collect();
    assert!(leg_ids.iter().all(|id| *id != incline.id));
}

#[tokio::test]
async fn test_history_notes_and_isolation_between_users() {
    let now = reference_now();
    let catalog = standard_catalog();
    let squat = find(&catalog, "Squat");
    let bench = find(&catalog, "Bench Press");
    let store = store_with_catalog(&catalog).await;

    let user_id = Uuid::new_v4();
    let other_user = Uuid::new_v4();
    store
        .add_workout(
            WorkoutBuilder::new(user_id, now - Duration::days(1))
                .exercise("Squat", Some(squat), Some(12), None)
                .build(),
        )
        .await;
    store
        .add_workout(
            WorkoutBuilder::new(other_user, now - Duration::days(1))
                .exercise("Bench Press", Some(bench), Some(5), Some(dec!(120.0)))
                .build(),
        )
        .await;

    let service = PlanGenerationService::new(as_dyn(&store));
    let plan = service
        .generate_weekly_plan_at(user_id, &GeneratePlanRequest::new(3, "general", "intermediate"), now)
        .await
        .unwrap();

    let squat_plan = plan
        .day("Leg Day")
        .and_then(|day| day.exercises.iter().find(|e| e.name == "Squat"))
        .expect("squat planned");
    assert_eq!(squat_plan.recommended_weight, None);
    assert_eq!(
        squat_plan.notes.as_deref(),
        Some("Last: 12 reps, no weight recorded")
    );

    let bench_plan = plan
        .day("Push Day")
        .and_then(|day| day.exercises.iter().find(|e| e.name == "Bench Press"))
        .expect("bench planned");
    assert_eq!(bench_plan.recommended_weight, None);
    assert_eq!(
        bench_plan.notes.as_deref(),
        Some("First time doing this exercise, start light")
    );
}

#[test]
fn test_presets_are_listed() {
    let store = std::sync::Arc::new(fitness_planner::storage::InMemoryWorkoutStore::new());
    let service = PlanGenerationService::new(store);

    let ids: Vec<&str> = service.plan_presets().iter().map(|preset| preset.id).collect();
    assert_eq!(
        ids,
        vec!["beginner-3day", "muscle-4day", "strength-4day", "ppl-6day", "weightloss-3day"]
    );
}
