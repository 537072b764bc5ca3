use sqlx::FromRow;

use super::model::Exercise;

#[derive(Debug, FromRow)]
pub struct ExerciseRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub muscle_group: String,
    pub equipment: String,
    pub category: String,
    pub is_compound: bool,
    pub exercise_family: Option<String>,
    pub exclude_from_cardio: bool,
    pub exclude_from_strength: bool,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub tips: Vec<String>,
}

impl TryFrom<ExerciseRow> for Exercise {
    type Error = anyhow::Error;

    fn try_from(r: ExerciseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(r.id),
            muscle_group: r.muscle_group.parse()?,
            category: r.category.parse()?,
            name: r.name,
            description: r.description,
            equipment: r.equipment,
            is_compound: r.is_compound,
            exercise_family: r.exercise_family.filter(|f| !f.trim().is_empty()),
            exclude_from_cardio: r.exclude_from_cardio,
            exclude_from_strength: r.exclude_from_strength,
            instructions: r.instructions,
            image_url: r.image_url,
            tips: r.tips,
        })
    }
}
