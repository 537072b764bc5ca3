use lazy_static::lazy_static;
use rand::{seq::SliceRandom, Rng};
use tracing::info;

use crate::exercises::model::{Category, Exercise, Goal, MuscleGroup as G};

use super::{
    dto::{PlanCriteria, PlanSource, WorkoutPlan},
    prescription::fallback_target_count,
    selection::select_exercises,
};

lazy_static! {
    /// Bodyweight-only exercises used when the catalog cannot serve a plan.
    static ref FALLBACK_EXERCISES: Vec<Exercise> = vec![
        Exercise::new("Push-Up", G::Chest, "bodyweight", true)
            .family("push-up")
            .describe(
                "A bodyweight chest exercise",
                "Keep your body straight and lower until elbows are at 90 degrees, then push back up.",
            )
            .tips(&[
                "Keep your core tight throughout the movement",
                "Don't let your hips sag",
                "Focus on full range of motion",
            ]),
        Exercise::new("Wide Push-Up", G::Chest, "bodyweight", true).family("push-up"),
        Exercise::new("Isometric Chest Squeeze", G::Chest, "bodyweight", false),
        Exercise::new("Doorway Row", G::Back, "bodyweight", true),
        Exercise::new("Superman", G::Back, "bodyweight", false).family("back-extension"),
        Exercise::new("Reverse Snow Angel", G::Back, "bodyweight", false).family("back-extension"),
        Exercise::new("Squat", G::Legs, "bodyweight", true)
            .family("squat")
            .describe(
                "A lower body compound exercise",
                "Stand with feet shoulder-width apart, lower your body as if sitting in a chair, then stand back up.",
            )
            .tips(&[
                "Keep your weight in your heels",
                "Keep your chest up",
                "Push your knees outward as you descend",
            ]),
        Exercise::new("Reverse Lunge", G::Legs, "bodyweight", true).family("lunge"),
        Exercise::new("Wall Sit", G::Legs, "bodyweight", false),
        Exercise::new("Calf Raise", G::Legs, "bodyweight", false),
        Exercise::new("Pike Push-Up", G::Shoulders, "bodyweight", true).family("push-up"),
        Exercise::new("Plank Shoulder Tap", G::Shoulders, "bodyweight", false),
        Exercise::new("Arm Circles", G::Shoulders, "bodyweight", false).category(Category::Warmup),
        Exercise::new("Bench Dip", G::Arms, "bodyweight", true).family("dip"),
        Exercise::new("Diamond Push-Up", G::Arms, "bodyweight", true).family("push-up"),
        Exercise::new("Towel Bicep Curl", G::Arms, "bodyweight", false),
        Exercise::new("Plank", G::Core, "bodyweight", false)
            .family("plank")
            .describe(
                "A core stabilizing exercise",
                "Hold a push-up position on your forearms, keeping your body in a straight line.",
            )
            .tips(&[
                "Keep your core engaged",
                "Don't let your hips rise or sag",
                "Breathe steadily throughout the hold",
            ]),
        Exercise::new("Side Plank", G::Core, "bodyweight", false).family("plank"),
        Exercise::new("Crunches", G::Core, "bodyweight", false).family("crunch"),
        Exercise::new("Glute Bridge", G::Glutes, "bodyweight", false).family("glute-bridge"),
        Exercise::new("Single-Leg Glute Bridge", G::Glutes, "bodyweight", false).family("glute-bridge"),
        Exercise::new("Donkey Kick", G::Glutes, "bodyweight", false),
        Exercise::new("Step-Up", G::Glutes, "bodyweight", true),
        Exercise::new("Jumping Jacks", G::FullBody, "bodyweight", true)
            .category(Category::Cardio)
            .not_for_strength()
            .describe(
                "A simple cardio exercise",
                "Jump while spreading your legs and raising your arms overhead, then jump back to the starting position.",
            )
            .tips(&[
                "Keep a steady rhythm",
                "Land softly by bending your knees",
                "Breathe rhythmically with the movement",
            ]),
        Exercise::new("Burpee", G::FullBody, "bodyweight", true)
            .family("burpee")
            .category(Category::Cardio)
            .not_for_strength(),
        Exercise::new("Bear Crawl", G::FullBody, "bodyweight", true),
        Exercise::new("Inchworm", G::FullBody, "bodyweight", true),
        Exercise::new("High Knees", G::Cardio, "bodyweight", false)
            .category(Category::Cardio)
            .not_for_strength(),
        Exercise::new("Mountain Climbers", G::Cardio, "bodyweight", true)
            .category(Category::Cardio)
            .not_for_strength(),
        Exercise::new("Skater Jumps", G::Cardio, "bodyweight", true)
            .category(Category::Cardio)
            .not_for_strength(),
    ];
}

pub fn fallback_exercises() -> &'static [Exercise] {
    &FALLBACK_EXERCISES
}

/// Builds a whole plan from the static table. Focus groups with no usable
/// entry fall back to the full-body entries; if those are unusable too the
/// plan is returned with no exercises.
pub fn fallback_plan<R: Rng + ?Sized>(criteria: &PlanCriteria, rng: &mut R) -> WorkoutPlan {
    let target = fallback_target_count(criteria.style, criteria.duration);
    let usable: Vec<&Exercise> = fallback_exercises()
        .iter()
        .filter(|e| {
            !criteria.blacklist.contains(&e.name)
                && e.allowed_for(criteria.goal)
                && criteria.equipment.allows(&e.equipment)
        })
        .collect();

    let mut pool: Vec<Exercise> = match criteria.focus.groups() {
        None => usable.iter().map(|e| (*e).clone()).collect(),
        Some(groups) => usable
            .iter()
            .filter(|e| groups.contains(&e.muscle_group))
            .map(|e| (*e).clone())
            .collect(),
    };
    if pool.is_empty() {
        pool = usable
            .iter()
            .filter(|e| e.muscle_group == G::FullBody)
            .map(|e| (*e).clone())
            .collect();
    }

    let picks = select_exercises(&criteria.focus, &pool, target, criteria.goal, rng);
    info!(
        pool = pool.len(),
        target,
        picked = picks.len(),
        "built fallback plan"
    );
    WorkoutPlan::assemble(criteria, PlanSource::Fallback, picks)
}

/// Static substitute for a hidden exercise: same group and kind first, then
/// any full-body compound entry.
pub fn static_replacement<R: Rng + ?Sized>(
    muscle_group: G,
    is_compound: bool,
    goal: Goal,
    exclude_names: &[String],
    rng: &mut R,
) -> Option<Exercise> {
    let usable = |e: &&Exercise| e.allowed_for(goal) && !exclude_names.contains(&e.name);

    let same_kind: Vec<&Exercise> = fallback_exercises()
        .iter()
        .filter(|e| e.muscle_group == muscle_group && e.is_compound == is_compound)
        .filter(usable)
        .collect();
    if let Some(ex) = same_kind.choose(rng) {
        return Some((*ex).clone());
    }

    let full_body: Vec<&Exercise> = fallback_exercises()
        .iter()
        .filter(|e| e.muscle_group == G::FullBody && e.is_compound)
        .filter(usable)
        .collect();
    full_body.choose(rng).map(|ex| (*ex).clone())
}

#[cfg(test)]
mod fallback_tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::workouts::{
        dto::GeneratePlanRequest, selection::selection_tests::assert_plan_invariants,
    };

    fn criteria(focus: &[&str], goal: &str, duration: i64, style: &str, blacklist: &[&str]) -> PlanCriteria {
        PlanCriteria::try_from(GeneratePlanRequest {
            focus: focus.iter().map(|s| s.to_string()).collect(),
            goal: Some(goal.into()),
            equipment: vec!["bodyweight".into(), "dumbbells".into()],
            duration: Some(duration.into()),
            style: Some(style.into()),
            blacklist: blacklist.iter().map(|s| s.to_string()).collect(),
        })
        .unwrap()
    }

    #[test]
    fn table_is_bodyweight_only() {
        assert!(fallback_exercises().iter().all(|e| e.equipment == "bodyweight"));
    }

    #[test]
    fn chest_and_arms_plan_uses_fallback_count() {
        let c = criteria(&["chest", "arms"], "strength", 30, "variety", &[]);
        let mut rng = StdRng::seed_from_u64(9);
        let plan = fallback_plan(&c, &mut rng);
        assert_eq!(plan.source, PlanSource::Fallback);
        // clamp(30 / 7, 4, 8) = 4
        assert_eq!(plan.exercises.len(), 4);
        let picks: Vec<Exercise> = plan.exercises.iter().map(|a| a.exercise.clone()).collect();
        assert_plan_invariants(&picks);
        assert!(picks
            .iter()
            .all(|e| matches!(e.muscle_group, G::Chest | G::Arms) && e.equipment == "bodyweight"));
    }

    #[test]
    fn blacklist_and_goal_are_respected() {
        let c = criteria(&["full_body"], "strength", 60, "variety", &["Squat", "Plank"]);
        for seed in 0..20 {
            let plan = fallback_plan(&c, &mut StdRng::seed_from_u64(seed));
            assert!(!plan.exercises.is_empty());
            for a in &plan.exercises {
                assert!(a.exercise.name != "Squat" && a.exercise.name != "Plank");
                assert!(!a.exercise.exclude_from_strength);
            }
        }
    }

    #[test]
    fn unusable_focus_falls_back_to_full_body_entries() {
        let c = criteria(
            &["glutes"],
            "cardio",
            20,
            "focus",
            &["Glute Bridge", "Single-Leg Glute Bridge", "Donkey Kick", "Step-Up"],
        );
        let plan = fallback_plan(&c, &mut StdRng::seed_from_u64(1));
        assert_eq!(plan.exercises.len(), 3);
        assert!(plan.exercises.iter().all(|a| a.exercise.muscle_group == G::FullBody));
    }

    #[test]
    fn static_replacement_prefers_same_group_and_kind() {
        let mut rng = StdRng::seed_from_u64(2);
        let ex = static_replacement(G::Legs, false, Goal::Strength, &[], &mut rng).unwrap();
        assert_eq!(ex.muscle_group, G::Legs);
        assert!(!ex.is_compound);
    }

    #[test]
    fn static_replacement_then_full_body_compound_then_nothing() {
        let mut rng = StdRng::seed_from_u64(2);
        let excluded = vec!["Isometric Chest Squeeze".to_string()];
        let ex = static_replacement(G::Chest, false, Goal::Strength, &excluded, &mut rng).unwrap();
        assert_eq!(ex.muscle_group, G::FullBody);
        assert!(ex.is_compound);

        let everything: Vec<String> = fallback_exercises().iter().map(|e| e.name.clone()).collect();
        assert!(static_replacement(G::Chest, false, Goal::Strength, &everything, &mut rng).is_none());
    }
}
