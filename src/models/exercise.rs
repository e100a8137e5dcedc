use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reference exercise from the shared catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CatalogExercise {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
}

/// Muscle groups every balanced program is expected to cover.
pub const REFERENCE_MUSCLE_GROUPS: [&str; 6] = ["Chest", "Back", "Legs", "Shoulders", "Arms", "Core"];

/// Maps a free-text muscle group onto its reference spelling when it matches one
/// case-insensitively. Anything else is returned trimmed but otherwise untouched.
pub fn canonical_muscle_group(raw: &str) -> String {
    let trimmed = raw.trim();
    REFERENCE_MUSCLE_GROUPS
        .iter()
        .find(|group| group.eq_ignore_ascii_case(trimmed))
        .map_or_else(|| trimmed.to_string(), |group| (*group).to_string())
}

pub fn same_muscle_group(a: &str, b: &str) -> bool {
    canonical_muscle_group(a) == canonical_muscle_group(b)
}
