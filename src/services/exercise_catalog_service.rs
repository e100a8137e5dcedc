use anyhow::Result;
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::CatalogExercise;
use crate::storage::WorkoutStore;

#[derive(Clone)]
pub struct ExerciseCatalogService {
    store: Arc<dyn WorkoutStore>,
}

impl ExerciseCatalogService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Catalog in name order, optionally restricted to one exact muscle group.
    pub async fn list_exercises(&self, muscle_group: Option<&str>) -> Result<Vec<CatalogExercise>> {
        let exercises = self.store.list_catalog_exercises().await?;

        Ok(match muscle_group.filter(|group| !group.is_empty()) {
            Some(group) => exercises
                .into_iter()
                .filter(|exercise| exercise.muscle_group.as_deref() == Some(group))
                .collect(),
            None => exercises,
        })
    }

    pub async fn get_exercise(&self, exercise_id: Uuid) -> Result<Option<CatalogExercise>> {
        Ok(self.store.get_catalog_exercise(exercise_id).await?)
    }

    /// Distinct muscle groups present in the catalog, sorted.
    pub async fn list_muscle_groups(&self) -> Result<Vec<String>> {
        let groups: BTreeSet<String> = self
            .store
            .list_catalog_exercises()
            .await?
            .into_iter()
            .filter_map(|exercise| exercise.muscle_group)
            .collect();

        Ok(groups.into_iter().collect())
    }
}
