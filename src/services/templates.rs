//! Static rule tables used to build weekly plans.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{canonical_muscle_group, ExperienceLevel, PlanGoal, PlanPreset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseTemplate {
    pub name: &'static str,
    pub base_sets: i32,
    pub base_reps: i32,
    pub duration_seconds: Option<i32>,
}

const fn template(name: &'static str, base_sets: i32, base_reps: i32) -> ExerciseTemplate {
    ExerciseTemplate {
        name,
        base_sets,
        base_reps,
        duration_seconds: None,
    }
}

const fn timed(name: &'static str, base_sets: i32, base_reps: i32, seconds: i32) -> ExerciseTemplate {
    ExerciseTemplate {
        name,
        base_sets,
        base_reps,
        duration_seconds: Some(seconds),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDay {
    pub name: &'static str,
    pub muscle_groups: &'static [&'static str],
}

const fn day(name: &'static str, muscle_groups: &'static [&'static str]) -> SplitDay {
    SplitDay { name, muscle_groups }
}

/// Exercises per muscle group, most important first.
pub static EXERCISE_TEMPLATES: &[(&str, &[ExerciseTemplate])] = &[
    (
        "Chest",
        &[
            template("Bench Press", 4, 10),
            template("Incline Dumbbell Press", 3, 12),
            template("Cable Fly", 3, 15),
        ],
    ),
    (
        "Back",
        &[
            template("Deadlift", 4, 8),
            template("Pull-up", 4, 10),
            template("Barbell Row", 3, 12),
            template("Lat Pulldown", 3, 12),
        ],
    ),
    (
        "Legs",
        &[
            template("Squat", 4, 10),
            template("Leg Press", 3, 12),
            template("Lunges", 3, 12),
            template("Leg Curl", 3, 15),
        ],
    ),
    (
        "Shoulders",
        &[
            template("Shoulder Press", 4, 10),
            template("Lateral Raise", 3, 15),
            template("Front Raise", 3, 12),
        ],
    ),
    (
        "Arms",
        &[
            template("Bicep Curl", 3, 12),
            template("Tricep Dips", 3, 12),
            template("Hammer Curl", 3, 12),
            template("Tricep Pushdown", 3, 15),
        ],
    ),
    (
        "Core",
        &[
            timed("Plank", 3, 1, 60),
            template("Crunch", 3, 20),
            template("Leg Raise", 3, 15),
        ],
    ),
];

const PUSH: &[&str] = &["Chest", "Shoulders", "Arms"];
const PULL: &[&str] = &["Back", "Arms"];
const LEGS: &[&str] = &["Legs", "Core"];

/// Split programs keyed by training days per week.
pub static SPLIT_PROGRAMS: &[(usize, &[SplitDay])] = &[
    (3, &[day("Push Day", PUSH), day("Pull Day", PULL), day("Leg Day", LEGS)]),
    (
        4,
        &[
            day("Upper Body A", &["Chest", "Back", "Shoulders"]),
            day("Lower Body A", LEGS),
            day("Upper Body B", &["Chest", "Back", "Arms"]),
            day("Lower Body B", LEGS),
        ],
    ),
    (
        5,
        &[
            day("Chest Day", &["Chest", "Core"]),
            day("Back Day", &["Back"]),
            day("Shoulder Day", &["Shoulders", "Core"]),
            day("Leg Day", &["Legs"]),
            day("Arm Day", &["Arms", "Core"]),
        ],
    ),
    (
        6,
        &[
            day("Push Day 1", PUSH),
            day("Pull Day 1", PULL),
            day("Leg Day 1", LEGS),
            day("Push Day 2", PUSH),
            day("Pull Day 2", PULL),
            day("Leg Day 2", LEGS),
        ],
    ),
];

pub static PLAN_PRESETS: &[PlanPreset] = &[
    PlanPreset {
        id: "beginner-3day",
        name: "Beginner Program",
        description: "Three days a week, full body training with the basic lifts",
        days_per_week: 3,
        goal: PlanGoal::General,
        level: ExperienceLevel::Beginner,
        suitable_for: "Ideal for people new to training",
    },
    PlanPreset {
        id: "muscle-4day",
        name: "Muscle Building",
        description: "Four days a week, upper-lower split",
        days_per_week: 4,
        goal: PlanGoal::Muscle,
        level: ExperienceLevel::Intermediate,
        suitable_for: "For those looking to add muscle mass",
    },
    PlanPreset {
        id: "strength-4day",
        name: "Strength Program",
        description: "Four days a week, focused on compound lifts",
        days_per_week: 4,
        goal: PlanGoal::Strength,
        level: ExperienceLevel::Intermediate,
        suitable_for: "For those chasing strength gains",
    },
    PlanPreset {
        id: "ppl-6day",
        name: "Push-Pull-Legs x2",
        description: "Six days a week, high volume program",
        days_per_week: 6,
        goal: PlanGoal::Muscle,
        level: ExperienceLevel::Advanced,
        suitable_for: "For experienced lifters",
    },
    PlanPreset {
        id: "weightloss-3day",
        name: "Fat Burn",
        description: "Three days a week, metabolism boosting program",
        days_per_week: 3,
        goal: PlanGoal::WeightLoss,
        level: ExperienceLevel::Beginner,
        suitable_for: "For those who want to lose weight",
    },
];

/// Templates for a muscle group, empty when the group has none.
pub fn exercise_templates(muscle_group: &str) -> &'static [ExerciseTemplate] {
    let canonical = canonical_muscle_group(muscle_group);
    EXERCISE_TEMPLATES
        .iter()
        .find(|(group, _)| *group == canonical)
        .map(|(_, templates)| *templates)
        .unwrap_or_default()
}

pub fn split_program(days_per_week: usize) -> Option<&'static [SplitDay]> {
    SPLIT_PROGRAMS
        .iter()
        .find(|(days, _)| *days == days_per_week)
        .map(|(_, program)| *program)
}

/// How many templates to take from the front of each muscle group's list.
pub fn exercise_count_for_goal(goal: PlanGoal) -> usize {
    match goal {
        PlanGoal::Strength => 2,
        PlanGoal::Muscle => 3,
        PlanGoal::Endurance => 3,
        PlanGoal::WeightLoss => 2,
        PlanGoal::General => 2,
    }
}

/// Applies the experience level and then the goal to a template's base volume.
/// Returns `(sets, reps)`.
pub fn adjust_volume(
    base_sets: i32,
    base_reps: i32,
    level: ExperienceLevel,
    goal: PlanGoal,
) -> (i32, i32) {
    let mut sets = match level {
        ExperienceLevel::Beginner => (base_sets - 1).max(2),
        ExperienceLevel::Intermediate => base_sets,
        ExperienceLevel::Advanced => base_sets + 1,
    };
    let mut reps = base_reps;

    match goal {
        PlanGoal::Strength => {
            reps = base_reps.min(6);
            sets = sets.max(4);
        }
        PlanGoal::Muscle => reps = base_reps.clamp(8, 12),
        PlanGoal::Endurance => {
            reps = base_reps.max(15);
            sets = (sets - 1).max(3);
        }
        PlanGoal::WeightLoss | PlanGoal::General => {}
    }

    (sets, reps)
}

/// Weight multiplier over the last recorded lift.
pub fn overload_rate(level: ExperienceLevel) -> Decimal {
    match level {
        ExperienceLevel::Beginner => dec!(1.025),
        ExperienceLevel::Intermediate => dec!(1.05),
        ExperienceLevel::Advanced => dec!(1.025),
    }
}

pub fn goal_display_name(goal: PlanGoal) -> &'static str {
    match goal {
        PlanGoal::Strength => "Güç",
        PlanGoal::Muscle => "Kas Geliştirme",
        PlanGoal::Endurance => "Dayanıklılık",
        PlanGoal::WeightLoss => "Yağ Yakımı",
        PlanGoal::General => "Genel Fitness",
    }
}

pub fn split_display_name(days_per_week: usize) -> &'static str {
    match days_per_week {
        3 => "Push-Pull-Legs",
        4 => "Upper-Lower",
        5 => "Bro Split",
        6 => "PPL x2",
        _ => "Özel",
    }
}

pub fn plan_name(goal: PlanGoal, days_per_week: usize) -> String {
    format!(
        "{} Programı ({})",
        goal_display_name(goal),
        split_display_name(days_per_week)
    )
}
