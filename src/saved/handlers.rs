use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::{ApiError, ValidationError},
    extractors::JsonBody,
    state::AppState,
    workouts::dto::WorkoutPlan,
};

use super::dto::{Pagination, SavedWorkout, SavedWorkoutItem};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", get(list_workouts).post(save_workout))
        .route("/workouts/:id", get(get_workout).delete(delete_workout))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<SavedWorkoutItem>>, ApiError> {
    let rows = state.workouts.list(p.limit, p.offset).await?;
    Ok(Json(rows.into_iter().map(SavedWorkoutItem::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedWorkout>, ApiError> {
    state
        .workouts
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Workout not found".into()))
}

/// POST /workouts, body is a generated plan
#[instrument(skip(state, plan), fields(name = %plan.name))]
pub async fn save_workout(
    State(state): State<AppState>,
    JsonBody(plan): JsonBody<WorkoutPlan>,
) -> Result<(StatusCode, HeaderMap, Json<SavedWorkout>), ApiError> {
    if plan.name.trim().is_empty() {
        return Err(ValidationError::Missing("name").into());
    }
    let saved = state.workouts.create(plan).await?;
    info!(id = %saved.id, "saved workout");

    let mut headers = HeaderMap::new();
    let location = HeaderValue::from_str(&format!("/api/workouts/{}", saved.id))
        .map_err(anyhow::Error::from)?;
    headers.insert(header::LOCATION, location);

    Ok((StatusCode::CREATED, headers, Json(saved)))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.workouts.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Workout not found".into()))
    }
}

#[cfg(test)]
mod handlers_tests {
    use super::*;
    use crate::{
        exercises::model::Goal,
        workouts::dto::{PlanSource, Style},
    };

    fn plan(name: &str) -> WorkoutPlan {
        WorkoutPlan {
            name: name.into(),
            duration: 30,
            goal: Goal::Strength,
            focus: vec!["chest".into()],
            style: Style::Focus,
            equipment: vec!["bodyweight".into()],
            source: PlanSource::Fallback,
            exercises: vec![],
        }
    }

    #[tokio::test]
    async fn save_get_list_delete() {
        let state = AppState::fake();

        let (status, headers, Json(saved)) =
            save_workout(State(state.clone()), JsonBody(plan("30-min Chest Strength Workout")))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            headers[header::LOCATION].to_str().unwrap(),
            format!("/api/workouts/{}", saved.id)
        );

        let Json(found) = get_workout(State(state.clone()), Path(saved.id)).await.unwrap();
        assert_eq!(found, saved);

        let Json(items) = list_workouts(State(state.clone()), Query(Pagination::default()))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "30-min Chest Strength Workout");

        let status = delete_workout(State(state.clone()), Path(saved.id)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        let err = get_workout(State(state), Path(saved.id)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paginated() {
        let state = AppState::fake();
        for name in ["first", "second", "third"] {
            save_workout(State(state.clone()), JsonBody(plan(name))).await.unwrap();
        }
        let Json(items) = list_workouts(
            State(state),
            Query(Pagination {
                limit: 2,
                offset: 0,
            }),
        )
        .await
        .unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["third", "second"]);
    }

    #[tokio::test]
    async fn unknown_ids_and_blank_names_are_rejected() {
        let state = AppState::fake();
        let err = delete_workout(State(state.clone()), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = save_workout(State(state), JsonBody(plan("  "))).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
