// Data models for workouts, profiles, plans and statistics

pub mod exercise;
pub mod performance;
pub mod plan;
pub mod stats;
pub mod user_profile;
pub mod workout;

pub use exercise::*;
pub use performance::*;
pub use plan::*;
pub use stats::*;
pub use user_profile::*;
pub use workout::*;
