use anyhow::Context;
use tracing::info;

use super::{
    model::{Category, Exercise, MuscleGroup as G},
    repo::ExerciseCatalog,
};

/// Inserts the built-in catalog when the store holds no exercise yet.
pub async fn seed_if_empty(catalog: &dyn ExerciseCatalog) -> anyhow::Result<u64> {
    let existing = catalog.count().await.context("count before seeding")?;
    if existing > 0 {
        info!(existing, "exercise catalog already populated");
        return Ok(0);
    }
    let inserted = catalog
        .insert_many(&seed_catalog())
        .await
        .context("insert seed catalog")?;
    info!(inserted, "seeded exercise catalog");
    Ok(inserted)
}

/// Built-in catalog inserted into an empty store at start-up.
pub fn seed_catalog() -> Vec<Exercise> {
    vec![
        // chest
        Exercise::new("Push-Up", G::Chest, "bodyweight", true)
            .family("push-up")
            .describe(
                "A bodyweight chest and triceps exercise",
                "Keep your body straight and lower until elbows are at 90 degrees, then push back up.",
            )
            .tips(&[
                "Keep your core tight throughout the movement",
                "Don't let your hips sag",
                "Focus on full range of motion",
            ]),
        Exercise::new("Spiderman Push-Up", G::Chest, "bodyweight", true)
            .family("push-up")
            .tips(&[
                "Bring knee to elbow as you descend",
                "Keep core engaged",
                "Alternate sides",
            ]),
        Exercise::new("Dumbbell Bench Press", G::Chest, "dumbbells", true)
            .family("bench-press")
            .tips(&[
                "Keep your feet flat on the floor",
                "Lower the dumbbells to chest level",
                "Press up in a controlled motion",
            ]),
        Exercise::new("Barbell Bench Press", G::Chest, "barbell", true)
            .family("bench-press")
            .not_for_cardio()
            .tips(&[
                "Keep your feet firmly planted on the ground",
                "Lower the bar to your mid-chest",
                "Keep your wrists straight and grip firm",
            ]),
        Exercise::new("Dumbbell Fly", G::Chest, "dumbbells", false)
            .family("chest-fly")
            .tips(&[
                "Keep a slight bend in your elbows",
                "Feel the stretch in your chest",
                "Focus on squeezing your chest muscles",
            ]),
        Exercise::new("Cable Chest Fly", G::Chest, "cable machine", false)
            .family("chest-fly")
            .tips(&[
                "Keep a slight bend in your elbows",
                "Control the weight on the return",
                "Don't let cables pull you forward",
            ]),
        // back
        Exercise::new("Pull-Up", G::Back, "pull-up bar", true).tips(&[
            "Engage your lats and pull with your back",
            "Don't swing or use momentum",
            "Pull until your chin is over the bar",
        ]),
        Exercise::new("Barbell Bent-Over Row", G::Back, "barbell", true)
            .family("bent-over-row")
            .not_for_cardio()
            .tips(&[
                "Keep your back straight and core engaged",
                "Pull the bar to your lower ribcage",
                "Squeeze your shoulder blades together",
            ]),
        Exercise::new("Dumbbell Bent-Over Row", G::Back, "dumbbells", true)
            .family("bent-over-row")
            .tips(&[
                "Keep your back straight",
                "Pull to your lower ribcage",
                "Squeeze your shoulder blades",
            ]),
        Exercise::new("Renegade Row", G::Back, "dumbbells", true).tips(&[
            "Keep your hips stable",
            "Don't rotate your body",
            "Row one arm at a time",
        ]),
        Exercise::new("Dumbbell Lat Pullover", G::Back, "dumbbells", false).tips(&[
            "Keep a slight bend in your elbows",
            "Feel the stretch in your lats",
            "Control the movement both ways",
        ]),
        Exercise::new("Superman", G::Back, "bodyweight", false),
        // legs
        Exercise::new("Bodyweight Squat", G::Legs, "bodyweight", true)
            .family("squat")
            .tips(&[
                "Keep your weight in your heels",
                "Keep your chest up and core engaged",
                "Go down until thighs are parallel to the floor",
            ]),
        Exercise::new("Goblet Squat", G::Legs, "dumbbells", true)
            .family("squat")
            .tips(&[
                "Hold the weight close to your chest",
                "Sit back into the squat",
                "Keep your torso upright",
            ]),
        Exercise::new("Barbell Back Squat", G::Legs, "barbell", true)
            .family("squat")
            .not_for_cardio()
            .tips(&[
                "Keep the bar positioned on your upper back",
                "Drive through your heels",
                "Keep your knees tracking over your toes",
            ]),
        Exercise::new("Reverse Lunge", G::Legs, "bodyweight", true)
            .family("lunge")
            .tips(&[
                "Step back, not forward",
                "Keep most weight on front leg",
                "Push through front heel to return",
            ]),
        Exercise::new("Dumbbell Reverse Lunge", G::Legs, "dumbbells", true)
            .family("lunge")
            .tips(&[
                "Hold weights at your sides",
                "Keep your torso upright",
                "Control the movement",
            ]),
        Exercise::new("Bulgarian Split Squat", G::Legs, "bodyweight", true).tips(&[
            "Keep most weight on front leg",
            "Don't bounce at the bottom",
            "Keep your torso upright",
        ]),
        Exercise::new("Squat Jump", G::Legs, "bodyweight", true)
            .category(Category::Cardio)
            .not_for_strength()
            .tips(&[
                "Land softly with bent knees",
                "Jump explosively from squat position",
                "Keep your chest up",
            ]),
        Exercise::new("Leg Press", G::Legs, "machine", true).not_for_cardio(),
        // shoulders
        Exercise::new("Dumbbell Overhead Press", G::Shoulders, "dumbbells", true)
            .family("overhead-press")
            .tips(&[
                "Keep your core tight",
                "Press straight up overhead",
                "Control the weight on the way down",
            ]),
        Exercise::new("Barbell Overhead Press", G::Shoulders, "barbell", true)
            .family("overhead-press")
            .not_for_cardio()
            .tips(&[
                "Keep your core tight to protect your lower back",
                "Press the bar straight up over your head",
                "Don't lean back excessively",
            ]),
        Exercise::new("Pike Push-Up", G::Shoulders, "bodyweight", true).family("push-up"),
        Exercise::new("Lateral Raise", G::Shoulders, "dumbbells", false).tips(&[
            "Use controlled movements, don't swing",
            "Lift to shoulder height, no higher",
            "Keep a slight bend in your elbows",
        ]),
        Exercise::new("Rear Delt Fly", G::Shoulders, "dumbbells", false).tips(&[
            "Keep slight bend in elbows",
            "Don't use momentum",
            "Squeeze shoulder blades together",
        ]),
        // arms
        Exercise::new("Dumbbell Bicep Curl", G::Arms, "dumbbells", false)
            .family("curl")
            .tips(&[
                "Keep your elbows close to your body",
                "Don't swing or use momentum",
                "Squeeze your biceps at the top",
            ]),
        Exercise::new("Hammer Curl", G::Arms, "dumbbells", false)
            .family("curl")
            .tips(&[
                "Keep palms facing each other",
                "Don't swing your arms",
                "Keep your elbows stationary",
            ]),
        Exercise::new("Tricep Dip", G::Arms, "bodyweight", true).tips(&[
            "Keep elbows pointed straight back",
            "Keep shoulders down away from ears",
            "Don't let your shoulders roll forward",
        ]),
        Exercise::new("Dumbbell Skullcrusher", G::Arms, "dumbbells", false)
            .family("tricep-extension")
            .tips(&[
                "Keep your elbows stationary",
                "Only move your forearms",
                "Don't let elbows flare out",
            ]),
        Exercise::new("Tricep Kickback", G::Arms, "dumbbells", false)
            .family("tricep-extension")
            .tips(&[
                "Keep your upper arm parallel to floor",
                "Only move your forearm",
                "Don't swing your arm",
            ]),
        // core
        Exercise::new("Low Plank", G::Core, "bodyweight", false)
            .family("plank")
            .tips(&[
                "Keep your body in a straight line",
                "Don't let your hips sag or rise",
                "Keep your shoulders over your elbows",
            ]),
        Exercise::new("Side Plank Dips", G::Core, "bodyweight", false)
            .family("plank")
            .tips(&["Keep body in straight line", "Dip hip toward ground", "Don't let hips sag"]),
        Exercise::new("Russian Twist", G::Core, "bodyweight", false).tips(&[
            "Keep your core engaged throughout",
            "Don't rush the movement",
            "Touch the ground on each side",
        ]),
        Exercise::new("Crunches", G::Core, "bodyweight", false)
            .family("crunch")
            .tips(&[
                "Keep your lower back on the ground",
                "Don't pull on your neck",
                "Focus on lifting with your abs",
            ]),
        Exercise::new("Bicycle Crunch", G::Core, "bodyweight", false)
            .family("crunch")
            .tips(&[
                "Don't pull on your neck",
                "Bring opposite elbow to knee",
                "Keep unused leg extended",
            ]),
        Exercise::new("Hanging Leg Raise", G::Core, "pull-up bar", false).tips(&[
            "Don't swing your body",
            "Use your abs to lift your legs",
            "Control the movement on the way down",
        ]),
        // glutes
        Exercise::new("Glute Bridge", G::Glutes, "bodyweight", false)
            .family("hip-thrust")
            .tips(&[
                "Squeeze your glutes at the top",
                "Keep your core tight",
                "Hold the top position briefly",
            ]),
        Exercise::new("Barbell Hip Thrust", G::Glutes, "barbell", true)
            .family("hip-thrust")
            .not_for_cardio()
            .tips(&[
                "Squeeze your glutes at the top",
                "Don't hyperextend your back",
                "Drive through your heels",
            ]),
        Exercise::new("Dumbbell Romanian Deadlift", G::Glutes, "dumbbells", true)
            .family("deadlift")
            .tips(&[
                "Hinge at the hips",
                "Keep dumbbells close to legs",
                "Don't round your back",
            ]),
        // full body
        Exercise::new("Burpee", G::FullBody, "bodyweight", true)
            .family("burpee")
            .category(Category::Cardio)
            .not_for_strength()
            .tips(&[
                "Modify by removing the push-up if needed",
                "Focus on form over speed",
                "Land softly to protect your joints",
            ]),
        Exercise::new("Burpee Broad Jump", G::FullBody, "bodyweight", true)
            .family("burpee")
            .category(Category::Cardio)
            .not_for_strength(),
        Exercise::new("Barbell Deadlift", G::FullBody, "barbell", true)
            .family("deadlift")
            .not_for_cardio()
            .tips(&[
                "Keep the bar close to your body",
                "Engage your lats to protect your back",
                "Drive through your heels",
            ]),
        Exercise::new("Kettlebell Swing", G::FullBody, "kettlebell", true).tips(&[
            "Drive the movement with your hips",
            "Don't squat, hinge at the hips",
            "Squeeze your glutes at the top",
        ]),
        Exercise::new("Dumbbell Thruster", G::FullBody, "dumbbells", true).tips(&[
            "Keep the weights at shoulder level",
            "Use your legs to drive the press",
            "Combine squat and press smoothly",
        ]),
        Exercise::new("Devil's Press", G::FullBody, "dumbbells", true),
        // cardio
        Exercise::new("Jumping Jacks", G::Cardio, "bodyweight", false)
            .category(Category::Cardio)
            .not_for_strength()
            .tips(&[
                "Keep a steady rhythm",
                "Land softly by bending your knees",
                "Breathe rhythmically with the movement",
            ]),
        Exercise::new("Mountain Climbers", G::Cardio, "bodyweight", true)
            .category(Category::Cardio)
            .not_for_strength()
            .tips(&[
                "Keep your hips stable and level",
                "Maintain proper plank position",
                "Don't let your hips bounce up and down",
            ]),
        Exercise::new("High Knees", G::Cardio, "bodyweight", false)
            .category(Category::Cardio)
            .not_for_strength()
            .tips(&[
                "Drive knees up to waist level",
                "Stay on balls of feet",
                "Keep arms pumping",
            ]),
        Exercise::new("Treadmill Run", G::Cardio, "treadmill", false)
            .category(Category::Cardio)
            .not_for_strength()
            .tips(&[
                "Start with a warm-up walk",
                "Keep your posture upright",
                "Breathe rhythmically",
            ]),
    ]
}

#[cfg(test)]
mod seed_tests {
    use std::collections::HashSet;

    use super::*;
    use crate::exercises::repo::InMemoryCatalog;

    #[tokio::test]
    async fn seeds_only_an_empty_catalog() {
        let catalog = InMemoryCatalog::new();
        let first = seed_if_empty(&catalog).await.unwrap();
        assert_eq!(first as usize, seed_catalog().len());
        assert_eq!(seed_if_empty(&catalog).await.unwrap(), 0);
        assert_eq!(catalog.count().await.unwrap() as usize, seed_catalog().len());
    }

    #[test]
    fn names_are_unique_and_non_empty() {
        let seed = seed_catalog();
        let names: HashSet<&str> = seed.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names.len(), seed.len());
        assert!(seed.iter().all(|e| !e.name.trim().is_empty()));
    }

    #[test]
    fn every_major_group_is_seeded() {
        let seed = seed_catalog();
        for group in G::MAJOR {
            assert!(
                seed.iter().any(|e| e.muscle_group == group),
                "no seed exercise for {group}"
            );
        }
    }
}
