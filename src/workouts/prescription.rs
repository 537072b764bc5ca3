use crate::exercises::model::{Category, Exercise, Goal};

use super::dto::{AnnotatedExercise, Style};

pub const GENERIC_TIPS: [&str; 3] = [
    "Keep proper form throughout the exercise",
    "Breathe steadily during the movement",
    "Focus on controlled movements",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub sets: u32,
    pub reps: &'static str,
}

/// Sets and reps for one exercise. Pure: the same inputs always give the same
/// prescription.
pub fn prescribe(exercise: &Exercise, goal: Goal, style: Style) -> Prescription {
    let (sets, reps) = match (goal, style) {
        (Goal::Strength, Style::Focus) => (4, "6-8"),
        (Goal::Strength, Style::Variety) => (3, "8-10"),
        (Goal::Cardio, Style::Focus) => (4, "40-50 seconds"),
        (Goal::Cardio, Style::Variety) => (3, "30-45 seconds"),
        (Goal::GeneralFitness, style) => match (exercise.category == Category::Cardio, style) {
            (true, Style::Focus) => (4, "30-40 seconds"),
            (true, Style::Variety) => (3, "30-45 seconds"),
            (false, Style::Focus) => (4, "10-12"),
            (false, Style::Variety) => (3, "10-15"),
        },
    };
    Prescription { sets, reps }
}

/// Keeps existing tips verbatim, otherwise fills in the generic ones.
pub fn ensure_tips(mut exercise: Exercise) -> Exercise {
    if exercise.tips.is_empty() {
        exercise.tips = GENERIC_TIPS.iter().map(|t| t.to_string()).collect();
    }
    exercise
}

pub fn annotate(exercise: Exercise, goal: Goal, style: Style) -> AnnotatedExercise {
    let Prescription { sets, reps } = prescribe(&exercise, goal, style);
    AnnotatedExercise {
        exercise: ensure_tips(exercise),
        sets,
        reps: reps.to_string(),
    }
}

/// Exercise count for plans built from the catalog.
pub fn catalog_target_count(style: Style, duration: u32) -> usize {
    let count = match style {
        Style::Focus => (duration / 12).clamp(2, 4),
        Style::Variety => (duration / 8).clamp(3, 8),
    };
    count as usize
}

/// Exercise count for plans built from the static fallback table. Tuned
/// separately from [`catalog_target_count`]; the two are not interchangeable.
pub fn fallback_target_count(style: Style, duration: u32) -> usize {
    let count = match style {
        Style::Focus => (duration / 10).clamp(3, 4),
        Style::Variety => (duration / 7).clamp(4, 8),
    };
    count as usize
}
