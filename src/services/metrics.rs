//! Pure body and training metric calculators.
//!
//! Every function here is total: missing inputs produce `None` instead of an error.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{ActivityLevel, Gender, HealthMetrics, UserProfile};

const DAYS_PER_YEAR: f64 = 365.25;
const SECONDS_PER_DAY: f64 = 86_400.0;
const STREAK_LOOKBACK_DAYS: i64 = 365;

/// Rounds to one decimal place, ties to even (`56.25` becomes `56.2`).
pub fn round_one_decimal(value: Decimal) -> Decimal {
    value.round_dp(1)
}

/// Mean of `total` over `count` rounded to one decimal place, zero when `count` is zero.
pub fn average_one_decimal(total: i64, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    round_one_decimal(Decimal::from(total) / Decimal::from(count))
}

/// Completed years between `date_of_birth` and `now`.
pub fn age(date_of_birth: Option<NaiveDate>, now: DateTime<Utc>) -> Option<i32> {
    let born_at = date_of_birth?.and_hms_opt(0, 0, 0)?.and_utc();
    if born_at > now {
        return None;
    }

    let elapsed_days = (now - born_at).num_seconds() as f64 / SECONDS_PER_DAY;
    Some((elapsed_days / DAYS_PER_YEAR).floor() as i32)
}

pub fn bmi(height_cm: Option<Decimal>, weight_kg: Option<Decimal>) -> Option<Decimal> {
    let (height_cm, weight_kg) = (height_cm?, weight_kg?);
    if height_cm <= Decimal::ZERO {
        return None;
    }

    let height_m = height_cm / dec!(100);
    weight_kg
        .checked_div(height_m * height_m)
        .map(round_one_decimal)
}

pub fn bmi_category(bmi: Option<Decimal>) -> Option<&'static str> {
    let bmi = bmi?;
    let category = if bmi < dec!(18.5) {
        "Underweight"
    } else if bmi < dec!(25) {
        "Normal"
    } else if bmi < dec!(30) {
        "Overweight"
    } else {
        "Obese"
    };
    Some(category)
}

/// Harris-Benedict BMR scaled by activity level, truncated to whole calories.
///
/// Only `Gender::Male` uses the male equation. An unknown activity level counts as
/// moderate.
pub fn daily_calories(
    weight_kg: Option<Decimal>,
    height_cm: Option<Decimal>,
    age_years: Option<i32>,
    gender: Option<Gender>,
    activity_level: Option<ActivityLevel>,
) -> Option<i32> {
    let weight = weight_kg?.to_f64()?;
    let height = height_cm?.to_f64()?;
    let age = f64::from(age_years?);

    let bmr = match gender {
        Some(Gender::Male) => 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age,
        _ => 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age,
    };
    let multiplier = activity_level.unwrap_or(ActivityLevel::Moderate).multiplier();

    Some((bmr * multiplier) as i32)
}

pub fn health_metrics(profile: &UserProfile, now: DateTime<Utc>) -> HealthMetrics {
    let bmi = bmi(profile.height_cm, profile.weight_kg);
    let age = age(profile.date_of_birth, now);

    HealthMetrics {
        bmi,
        bmi_category: bmi_category(bmi).map(str::to_string),
        estimated_daily_calories: daily_calories(
            profile.weight_kg,
            profile.height_cm,
            age,
            profile.gender,
            profile.activity_level,
        ),
        age,
    }
}

/// Returns `(current, longest)` workout streaks in days.
///
/// `workout_dates` may contain duplicates and be in any order. The current streak only
/// counts when `today` or the day before has a workout.
pub fn streaks<I>(workout_dates: I, today: NaiveDate) -> (u32, u32)
where
    I: IntoIterator<Item = NaiveDate>,
{
    let dates: BTreeSet<NaiveDate> = workout_dates.into_iter().collect();
    if dates.is_empty() {
        return (0, 0);
    }

    let yesterday = today - Duration::days(1);
    let anchor = if dates.contains(&today) {
        Some(today)
    } else if dates.contains(&yesterday) {
        Some(yesterday)
    } else {
        None
    };

    let current = anchor.map_or(0, |anchor| {
        let mut streak = 1;
        for offset in 1..STREAK_LOOKBACK_DAYS {
            if !dates.contains(&(anchor - Duration::days(offset))) {
                break;
            }
            streak += 1;
        }
        streak
    });

    let mut longest = 1;
    let mut run = 1;
    let descending: Vec<&NaiveDate> = dates.iter().rev().collect();
    for pair in descending.windows(2) {
        if (*pair[0] - *pair[1]).num_days() == 1 {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 1;
        }
    }
    longest = longest.max(run).max(current);

    (current, longest)
}
