mod common;

use std::collections::BTreeMap;

use chrono::Duration;
use fitness_planner::models::REFERENCE_MUSCLE_GROUPS;
use fitness_planner::services::performance_analysis_service::classify_muscle_groups;
use fitness_planner::services::PerformanceAnalysisService;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use proptest::prelude::*;
use uuid::Uuid;

use common::{as_dyn, find, reference_now, standard_catalog, store_with_catalog, WorkoutBuilder};

#[tokio::test]
async fn test_analysis_over_last_thirty_days() {
    let now = reference_now();
    let user_id = Uuid::new_v4();
    let catalog = standard_catalog();
    let bench = find(&catalog, "Bench Press");
    let pull_up = find(&catalog, "Pull-up");
    let squat = find(&catalog, "Squat");
    let store = store_with_catalog(&catalog).await;

    // Chest 6, Back 3, Legs 1 inside the window.
    for day in 1..=3 {
        store
            .add_workout(
                WorkoutBuilder::new(user_id, now - Duration::days(day))
                    .lasting(40 + day * 10)
                    .catalog_exercise(bench)
                    .catalog_exercise(bench)
                    .catalog_exercise(pull_up)
                    .build(),
            )
            .await;
    }
    store
        .add_workout(
            WorkoutBuilder::new(user_id, now - Duration::days(10))
                .lasting(45)
                .catalog_exercise(squat)
                .exercise("Farmer Walk", None, Some(1), None)
                .build(),
        )
        .await;

    // Outside the window, unfinished, or someone else's: all ignored.
    store
        .add_workout(
            WorkoutBuilder::new(user_id, now - Duration::days(45))
                .catalog_exercise(squat)
                .build(),
        )
        .await;
    store
        .add_workout(
            WorkoutBuilder::new(user_id, now - Duration::hours(2))
                .in_progress()
                .catalog_exercise(squat)
                .build(),
        )
        .await;
    store
        .add_workout(
            WorkoutBuilder::new(Uuid::new_v4(), now - Duration::days(1))
                .catalog_exercise(squat)
                .build(),
        )
        .await;

    let service = PerformanceAnalysisService::new(as_dyn(&store));
    let analysis = service.analyze_performance_at(user_id, now).await.unwrap();

    assert_eq!(analysis.total_workouts_last_30_days, 4);
    // (50 + 60 + 70 + 45) / 4 = 56.25
    assert_eq!(analysis.average_workout_duration, dec!(56.2));

    let expected: BTreeMap<String, usize> = [("Back", 3), ("Chest", 6), ("Legs", 1)]
        .into_iter()
        .map(|(group, count)| (group.to_string(), count))
        .collect();
    assert_eq!(analysis.muscle_group_frequency, expected);

    // average = 10 / 3: under < 1.67, over > 5
    assert_eq!(
        analysis.undertrained_muscles,
        vec!["Legs", "Shoulders", "Arms", "Core"]
    );
    assert_eq!(analysis.overtrained_muscles, vec!["Chest"]);
    assert_eq!(
        analysis.recommended_focus,
        "Undertrained muscle groups: Legs, Shoulders, Arms, Core"
    );
    assert!(analysis.suggestions.is_empty());
}

#[tokio::test]
async fn test_suggestions_use_latest_weight_per_exercise() {
    let now = reference_now();
    let user_id = Uuid::new_v4();
    let catalog = standard_catalog();
    let bench = find(&catalog, "Bench Press");
    let squat = find(&catalog, "Squat");
    let store = store_with_catalog(&catalog).await;

    store
        .add_workout(
            WorkoutBuilder::new(user_id, now - Duration::days(9))
                .exercise("Bench Press", Some(bench), Some(8), Some(dec!(90.0)))
                .build(),
        )
        .await;
    store
        .add_workout(
            WorkoutBuilder::new(user_id, now - Duration::days(2))
                .exercise("Bench Press", Some(bench), Some(8), Some(dec!(100.0)))
                .exercise("Squat", Some(squat), Some(5), Some(dec!(62.5)))
                .exercise("Plank", None, Some(1), None)
                .build(),
        )
        .await;

    let service = PerformanceAnalysisService::new(as_dyn(&store));
    let analysis = service.analyze_performance_at(user_id, now).await.unwrap();

    assert_eq!(analysis.suggestions.len(), 2);

    // Squat was logged after the bench press in the same session.
    let squat_suggestion = &analysis.suggestions[0];
    assert_eq!(squat_suggestion.exercise_name, "Squat");
    assert_eq!(squat_suggestion.last_weight, Some(dec!(62.5)));
    assert_eq!(squat_suggestion.suggested_weight, Some(dec!(65.6)));
    assert_eq!(squat_suggestion.suggested_reps, Some(5));

    let bench_suggestion = &analysis.suggestions[1];
    assert_eq!(bench_suggestion.exercise_name, "Bench Press");
    assert_eq!(bench_suggestion.last_weight, Some(dec!(100.0)));
    assert_eq!(bench_suggestion.suggested_weight, Some(dec!(105.0)));
    assert_eq!(
        bench_suggestion.reason,
        "5% weight increase for progressive overload"
    );
}

#[tokio::test]
async fn test_suggestions_keep_five_most_recent_exercises() {
    let now = reference_now();
    let user_id = Uuid::new_v4();
    let store = store_with_catalog(&[]).await;

    let names = ["Deadlift", "Row", "Lunge", "Dip", "Curl", "Shrug", "Press"];
    for (index, name) in names.iter().enumerate() {
        let days_ago = (names.len() - index) as i64;
        store
            .add_workout(
                WorkoutBuilder::new(user_id, now - Duration::days(days_ago))
                    .exercise(name, None, Some(8), Some(Decimal::from(40 + index as i64)))
                    .build(),
            )
            .await;
    }

    let service = PerformanceAnalysisService::new(as_dyn(&store));
    let analysis = service.analyze_performance_at(user_id, now).await.unwrap();

    let suggested: Vec<&str> = analysis
        .suggestions
        .iter()
        .map(|suggestion| suggestion.exercise_name.as_str())
        .collect();
    assert_eq!(suggested, vec!["Press", "Shrug", "Curl", "Dip", "Lunge"]);
    assert_eq!(analysis.suggestions[0].last_weight, Some(dec!(46)));
}

#[tokio::test]
async fn test_no_history_is_all_undertrained() {
    let store = store_with_catalog(&standard_catalog()).await;
    let service = PerformanceAnalysisService::new(as_dyn(&store));

    let analysis = service
        .analyze_performance_at(Uuid::new_v4(), reference_now())
        .await
        .unwrap();

    assert_eq!(analysis.total_workouts_last_30_days, 0);
    assert_eq!(analysis.average_workout_duration, Decimal::ZERO);
    assert!(analysis.muscle_group_frequency.is_empty());
    assert_eq!(analysis.undertrained_muscles, REFERENCE_MUSCLE_GROUPS.to_vec());
    assert!(analysis.overtrained_muscles.is_empty());
}

#[tokio::test]
async fn test_balanced_program_message() {
    let now = reference_now();
    let user_id = Uuid::new_v4();
    let catalog = standard_catalog();
    let store = store_with_catalog(&catalog).await;

    let mut workout = WorkoutBuilder::new(user_id, now - Duration::days(1));
    for exercise in &catalog {
        workout = workout.catalog_exercise(exercise);
    }
    store.add_workout(workout.build()).await;

    let service = PerformanceAnalysisService::new(as_dyn(&store));
    let analysis = service.analyze_performance_at(user_id, now).await.unwrap();

    assert!(analysis.undertrained_muscles.is_empty());
    assert!(analysis.overtrained_muscles.is_empty());
    assert_eq!(analysis.recommended_focus, "You are following a balanced program!");
}

fn muscle_group_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(REFERENCE_MUSCLE_GROUPS.to_vec()).prop_map(str::to_string),
        "[A-Z][a-z]{2,8}",
    ]
}

proptest! {
    #[test]
    fn prop_undertrained_and_overtrained_are_disjoint(
        frequency in prop::collection::btree_map(muscle_group_name(), 1usize..40, 0..10)
    ) {
        let (under, over) = classify_muscle_groups(&frequency);

        for group in &under {
            prop_assert!(!over.contains(group));
            prop_assert!(REFERENCE_MUSCLE_GROUPS.contains(&group.as_str()));
        }
    }
}
