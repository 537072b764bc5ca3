use rand::Rng;
use tracing::{info, warn};

use crate::exercises::repo::ExerciseCatalog;

use super::{
    candidates::{fetch_candidates, FetchError},
    dto::{PlanCriteria, PlanSource, WorkoutPlan},
    fallback::fallback_plan,
    prescription::catalog_target_count,
    selection::select_exercises,
};

/// Builds a plan from the catalog, or from the static bodyweight table when the
/// catalog is empty, unreachable, or has nothing matching the request.
pub async fn generate_plan<R: Rng + Send + ?Sized>(
    catalog: &dyn ExerciseCatalog,
    criteria: &PlanCriteria,
    rng: &mut R,
) -> WorkoutPlan {
    let target = catalog_target_count(criteria.style, criteria.duration);

    let candidates = match fetch_candidates(catalog, criteria).await {
        Ok(found) if found.is_empty() => {
            info!(focus = ?criteria.focus_labels(), "no catalog match, using fallback plan");
            return fallback_plan(criteria, rng);
        }
        Ok(found) => found,
        Err(FetchError::EmptyCatalog) => {
            info!("exercise catalog is empty, using fallback plan");
            return fallback_plan(criteria, rng);
        }
        Err(FetchError::Store(e)) => {
            warn!(error = %e, "catalog query failed, using fallback plan");
            return fallback_plan(criteria, rng);
        }
    };

    let picks = select_exercises(&criteria.focus, &candidates, target, criteria.goal, rng);
    info!(
        candidates = candidates.len(),
        target,
        picked = picks.len(),
        "built catalog plan"
    );
    WorkoutPlan::assemble(criteria, PlanSource::Catalog, picks)
}

#[cfg(test)]
mod services_tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        exercises::{
            model::{Exercise, MuscleGroup},
            repo::InMemoryCatalog,
            seed::seed_catalog,
        },
        workouts::{dto::GeneratePlanRequest, selection::selection_tests::assert_plan_invariants},
    };

    fn criteria(focus: &[&str], goal: &str, duration: i64, style: &str) -> PlanCriteria {
        PlanCriteria::try_from(GeneratePlanRequest {
            focus: focus.iter().map(|s| s.to_string()).collect(),
            goal: Some(goal.into()),
            equipment: vec!["bodyweight".into(), "dumbbells".into()],
            duration: Some(duration.into()),
            style: Some(style.into()),
            blacklist: vec![],
        })
        .unwrap()
    }

    fn picks(plan: &WorkoutPlan) -> Vec<Exercise> {
        plan.exercises.iter().map(|a| a.exercise.clone()).collect()
    }

    #[tokio::test]
    async fn chest_and_arms_strength_variety() {
        let catalog = InMemoryCatalog::with_exercises(seed_catalog());
        let c = criteria(&["chest", "arms"], "strength", 30, "variety");
        for seed in 0..10 {
            let plan = generate_plan(&catalog, &c, &mut StdRng::seed_from_u64(seed)).await;
            assert_eq!(plan.source, PlanSource::Catalog);
            assert_eq!(plan.name, "30-min Chest & Arms Strength Workout");
            assert_eq!(plan.exercises.len(), 3);
            let ex = picks(&plan);
            assert_plan_invariants(&ex);
            assert!(ex
                .iter()
                .all(|e| matches!(e.muscle_group, MuscleGroup::Chest | MuscleGroup::Arms)));
            assert!(ex
                .iter()
                .all(|e| e.equipment == "bodyweight" || e.equipment == "dumbbells"));
            assert!(plan.exercises.iter().all(|a| !a.exercise.tips.is_empty()));
        }
    }

    #[tokio::test]
    async fn full_body_plan_from_seed_catalog() {
        let catalog = InMemoryCatalog::with_exercises(seed_catalog());
        let c = criteria(&["full_body"], "general_fitness", 60, "variety");
        let plan = generate_plan(&catalog, &c, &mut StdRng::seed_from_u64(21)).await;
        assert_eq!(plan.source, PlanSource::Catalog);
        assert_eq!(plan.exercises.len(), 7);
        assert_plan_invariants(&picks(&plan));
    }

    #[tokio::test]
    async fn empty_catalog_gives_bodyweight_fallback() {
        let catalog = InMemoryCatalog::new();
        let c = criteria(&["legs"], "cardio", 20, "focus");
        let plan = generate_plan(&catalog, &c, &mut StdRng::seed_from_u64(2)).await;
        assert_eq!(plan.source, PlanSource::Fallback);
        assert!(!plan.exercises.is_empty());
        assert!(plan.exercises.iter().all(|a| a.exercise.equipment == "bodyweight"));
    }

    #[tokio::test]
    async fn unmatched_focus_gives_fallback() {
        let catalog = InMemoryCatalog::with_exercises(vec![Exercise::new(
            "Barbell Back Squat",
            MuscleGroup::Legs,
            "barbell",
            true,
        )]);
        let c = criteria(&["core"], "strength", 30, "focus");
        let plan = generate_plan(&catalog, &c, &mut StdRng::seed_from_u64(2)).await;
        assert_eq!(plan.source, PlanSource::Fallback);
        assert!(plan
            .exercises
            .iter()
            .all(|a| a.exercise.muscle_group == MuscleGroup::Core));
    }
}
