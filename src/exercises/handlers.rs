use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

use super::{
    model::{Exercise, MuscleGroup},
    repo::CatalogFilter,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseListQuery {
    pub muscle_group: Option<MuscleGroup>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/exercises", get(list_exercises))
}

/// Whole catalog, or one muscle group of it, sorted by name.
#[instrument(skip(state))]
pub async fn list_exercises(
    State(state): State<AppState>,
    Query(q): Query<ExerciseListQuery>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    let filter = CatalogFilter {
        muscle_groups: q.muscle_group.map(|g| vec![g]),
        ..CatalogFilter::default()
    };
    let exercises = state.catalog.query(&filter).await?;
    Ok(Json(exercises))
}

#[cfg(test)]
mod handlers_tests {
    use super::*;
    use crate::exercises::seed::seed_catalog;

    #[tokio::test]
    async fn lists_the_seeded_catalog() {
        let state = AppState::fake_seeded().await;
        let Json(all) = list_exercises(State(state.clone()), Query(ExerciseListQuery::default()))
            .await
            .unwrap();
        assert_eq!(all.len(), seed_catalog().len());
        assert!(all.windows(2).all(|w| w[0].name <= w[1].name));

        let Json(core) = list_exercises(
            State(state),
            Query(ExerciseListQuery {
                muscle_group: Some(MuscleGroup::Core),
            }),
        )
        .await
        .unwrap();
        assert!(!core.is_empty());
        assert!(core.iter().all(|e| e.muscle_group == MuscleGroup::Core));
    }
}
