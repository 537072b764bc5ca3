use axum::{extract::State, routing::post, Json, Router};
use rand::{rngs::StdRng, SeedableRng};
use tracing::instrument;

use crate::{error::ApiError, exercises::model::Exercise, extractors::JsonBody, state::AppState};

use super::{
    dto::{GeneratePlanRequest, PlanCriteria, ReplacementRequest, WorkoutPlan},
    fallback::fallback_plan,
    replacement::{find_replacement, ReplacementCriteria},
    services::generate_plan,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate-workout", post(generate_workout))
        .route("/generate-workout-fallback", post(generate_workout_fallback))
        .route("/find-replacement-exercise", post(find_replacement_exercise))
}

#[instrument(skip(state, body))]
pub async fn generate_workout(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<GeneratePlanRequest>,
) -> Result<Json<WorkoutPlan>, ApiError> {
    let criteria = PlanCriteria::try_from(body)?;
    let mut rng = StdRng::from_entropy();
    let plan = generate_plan(state.catalog.as_ref(), &criteria, &mut rng).await;
    Ok(Json(plan))
}

/// Same contract as `generate_workout`, always served from the static table.
#[instrument(skip(body))]
pub async fn generate_workout_fallback(
    JsonBody(body): JsonBody<GeneratePlanRequest>,
) -> Result<Json<WorkoutPlan>, ApiError> {
    let criteria = PlanCriteria::try_from(body)?;
    let mut rng = StdRng::from_entropy();
    Ok(Json(fallback_plan(&criteria, &mut rng)))
}

/// Answers `null` when nothing can stand in for the hidden exercise.
#[instrument(skip(state, body), fields(group = %body.muscle_group))]
pub async fn find_replacement_exercise(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ReplacementRequest>,
) -> Json<Option<Exercise>> {
    let criteria = ReplacementCriteria::from(body);
    let mut rng = StdRng::from_entropy();
    Json(find_replacement(state.catalog.as_ref(), &criteria, &mut rng).await)
}

#[cfg(test)]
mod handlers_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::*;
    use crate::exercises::model::{Goal, MuscleGroup};
    use crate::workouts::dto::PlanSource;

    fn body(focus: &[&str], duration: Option<i64>) -> GeneratePlanRequest {
        GeneratePlanRequest {
            focus: focus.iter().map(|s| s.to_string()).collect(),
            goal: Some("strength".into()),
            equipment: vec!["all".into()],
            duration: duration.map(Into::into),
            style: Some("focus".into()),
            blacklist: vec![],
        }
    }

    #[tokio::test]
    async fn generates_from_the_seeded_catalog() {
        let state = AppState::fake_seeded().await;
        let Json(plan) = generate_workout(State(state), JsonBody(body(&["legs"], Some(36))))
            .await
            .unwrap();
        assert_eq!(plan.source, PlanSource::Catalog);
        assert_eq!(plan.exercises.len(), 3);
        assert_eq!(plan.name, "36-min Legs Strength Workout");
    }

    #[tokio::test]
    async fn empty_catalog_still_answers_with_a_plan() {
        let state = AppState::fake();
        let Json(plan) = generate_workout(State(state), JsonBody(body(&["core"], Some(30))))
            .await
            .unwrap();
        assert_eq!(plan.source, PlanSource::Fallback);
        assert!(!plan.exercises.is_empty());
    }

    #[tokio::test]
    async fn invalid_request_is_a_bad_request() {
        let state = AppState::fake();
        let err = generate_workout(State(state), JsonBody(body(&["core"], None)))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = generate_workout_fallback(JsonBody(body(&[], Some(30))))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fallback_route_ignores_the_catalog() {
        let Json(plan) = generate_workout_fallback(JsonBody(body(&["legs"], Some(40))))
            .await
            .unwrap();
        assert_eq!(plan.source, PlanSource::Fallback);
        assert_eq!(plan.exercises.len(), 4);
    }

    #[tokio::test]
    async fn replacement_respects_exclusions() {
        let state = AppState::fake_seeded().await;
        let req = ReplacementRequest {
            muscle_group: MuscleGroup::Chest,
            goal: Goal::Strength,
            equipment: vec!["bodyweight".into()],
            is_compound: true,
            exclude_names: vec!["Push-Up".into()],
        };
        let Json(found) = find_replacement_exercise(State(state), JsonBody(req)).await;
        let ex = found.unwrap();
        assert_ne!(ex.name, "Push-Up");
        assert_eq!(ex.equipment, "bodyweight");
        assert!(!ex.tips.is_empty());
    }
}
