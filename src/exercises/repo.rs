use anyhow::Context;
use axum::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{
    model::{EquipmentSelection, Exercise, Goal, MuscleGroup},
    repo_types::ExerciseRow,
};

/// Query contract shared by every catalog backend.
///
/// `None`/empty fields mean "no restriction". The goal only contributes its
/// exclusion flag; `GeneralFitness` excludes nothing.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub muscle_groups: Option<Vec<MuscleGroup>>,
    pub equipment: EquipmentSelection,
    pub goal: Option<Goal>,
    pub is_compound: Option<bool>,
    pub exclude_names: Vec<String>,
}

impl CatalogFilter {
    pub fn matches(&self, ex: &Exercise) -> bool {
        if let Some(groups) = &self.muscle_groups {
            if !groups.contains(&ex.muscle_group) {
                return false;
            }
        }
        if let Some(goal) = self.goal {
            if !ex.allowed_for(goal) {
                return false;
            }
        }
        if let Some(compound) = self.is_compound {
            if ex.is_compound != compound {
                return false;
            }
        }
        self.equipment.allows(&ex.equipment) && !self.exclude_names.iter().any(|n| n == &ex.name)
    }
}

/// Read-mostly exercise store. Writes only happen through seeding.
#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// Total number of rows, ignoring any filter.
    async fn count(&self) -> anyhow::Result<i64>;
    async fn query(&self, filter: &CatalogFilter) -> anyhow::Result<Vec<Exercise>>;
    /// Inserts records whose name is not taken yet; returns how many were added.
    async fn insert_many(&self, exercises: &[Exercise]) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgCatalog {
    db: PgPool,
}

impl PgCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExerciseCatalog for PgCatalog {
    async fn count(&self) -> anyhow::Result<i64> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercises")
            .fetch_one(&self.db)
            .await
            .context("count exercises")?;
        Ok(n)
    }

    async fn query(&self, filter: &CatalogFilter) -> anyhow::Result<Vec<Exercise>> {
        let groups: Option<Vec<String>> = filter
            .muscle_groups
            .as_ref()
            .map(|gs| gs.iter().map(|g| g.as_str().to_string()).collect());

        let rows = sqlx::query_as::<_, ExerciseRow>(
            r#"
            SELECT id, name, description, muscle_group, equipment, category, is_compound,
                   exercise_family, exclude_from_cardio, exclude_from_strength,
                   instructions, image_url, tips
            FROM exercises
            WHERE ($1::text[] IS NULL OR muscle_group = ANY($1))
              AND ($2::text[] IS NULL OR equipment = ANY($2))
              AND NOT ($3 AND exclude_from_cardio)
              AND NOT ($4 AND exclude_from_strength)
              AND NOT (name = ANY($5))
              AND ($6::boolean IS NULL OR is_compound = $6)
            ORDER BY name
            "#,
        )
        .bind(groups)
        .bind(filter.equipment.to_query())
        .bind(filter.goal == Some(Goal::Cardio))
        .bind(filter.goal == Some(Goal::Strength))
        .bind(&filter.exclude_names)
        .bind(filter.is_compound)
        .fetch_all(&self.db)
        .await
        .context("query exercises")?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let name = row.name.clone();
            match Exercise::try_from(row) {
                Ok(ex) => out.push(ex),
                Err(e) => warn!(error = %e, %name, "skipping malformed exercise row"),
            }
        }
        debug!(rows = out.len(), "catalog query");
        Ok(out)
    }

    async fn insert_many(&self, exercises: &[Exercise]) -> anyhow::Result<u64> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let mut inserted = 0;
        for ex in exercises {
            let res = sqlx::query(
                r#"
                INSERT INTO exercises (name, description, muscle_group, equipment, category,
                                       is_compound, exercise_family, exclude_from_cardio,
                                       exclude_from_strength, instructions, image_url, tips)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(&ex.name)
            .bind(&ex.description)
            .bind(ex.muscle_group.as_str())
            .bind(&ex.equipment)
            .bind(ex.category.as_str())
            .bind(ex.is_compound)
            .bind(&ex.exercise_family)
            .bind(ex.exclude_from_cardio)
            .bind(ex.exclude_from_strength)
            .bind(&ex.instructions)
            .bind(&ex.image_url)
            .bind(&ex.tips)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("insert exercise {}", ex.name))?;
            inserted += res.rows_affected();
        }
        tx.commit().await.context("commit tx")?;
        Ok(inserted)
    }
}

/// Catalog kept in process memory; used when no database is configured and
/// as the test double.
#[derive(Default)]
pub struct InMemoryCatalog {
    rows: RwLock<Vec<Exercise>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exercises(exercises: Vec<Exercise>) -> Self {
        let rows = exercises
            .into_iter()
            .enumerate()
            .map(|(i, mut ex)| {
                ex.id = Some(i as i32 + 1);
                ex
            })
            .collect();
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl ExerciseCatalog for InMemoryCatalog {
    async fn count(&self) -> anyhow::Result<i64> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn query(&self, filter: &CatalogFilter) -> anyhow::Result<Vec<Exercise>> {
        let rows = self.rows.read().await;
        let mut out: Vec<Exercise> = rows.iter().filter(|ex| filter.matches(ex)).cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn insert_many(&self, exercises: &[Exercise]) -> anyhow::Result<u64> {
        let mut rows = self.rows.write().await;
        let mut inserted = 0;
        for ex in exercises {
            if rows.iter().any(|r| r.name == ex.name) {
                continue;
            }
            let mut ex = ex.clone();
            ex.id = Some(rows.len() as i32 + 1);
            rows.push(ex);
            inserted += 1;
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    fn sample() -> Vec<Exercise> {
        vec![
            Exercise::new("Push-Up", MuscleGroup::Chest, "bodyweight", true).family("push-up"),
            Exercise::new("Dumbbell Bench Press", MuscleGroup::Chest, "dumbbells", true),
            Exercise::new("Barbell Bench Press", MuscleGroup::Chest, "barbell", true).not_for_cardio(),
            Exercise::new("Dumbbell Bicep Curl", MuscleGroup::Arms, "dumbbells", false),
            Exercise::new("Treadmill Run", MuscleGroup::Cardio, "treadmill", false).not_for_strength(),
        ]
    }

    #[tokio::test]
    async fn empty_filter_returns_everything_sorted() {
        let catalog = InMemoryCatalog::with_exercises(sample());
        let all = catalog.query(&CatalogFilter::default()).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].name, "Barbell Bench Press");
        assert_eq!(catalog.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn filter_combines_group_equipment_goal_and_names() {
        let catalog = InMemoryCatalog::with_exercises(sample());
        let filter = CatalogFilter {
            muscle_groups: Some(vec![MuscleGroup::Chest]),
            equipment: EquipmentSelection::from_names(["barbell"]),
            goal: Some(Goal::Cardio),
            is_compound: None,
            exclude_names: vec![],
        };
        let names: Vec<String> = catalog
            .query(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Push-Up".to_string()]);

        let filter = CatalogFilter {
            exclude_names: vec!["Push-Up".into()],
            is_compound: Some(true),
            ..CatalogFilter::default()
        };
        let names: Vec<String> = catalog
            .query(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Barbell Bench Press", "Dumbbell Bench Press"]);
    }

    #[tokio::test]
    async fn insert_many_skips_taken_names() {
        let catalog = InMemoryCatalog::new();
        assert_eq!(catalog.insert_many(&sample()).await.unwrap(), 5);
        assert_eq!(catalog.insert_many(&sample()[..2]).await.unwrap(), 0);
        assert_eq!(catalog.count().await.unwrap(), 5);
    }
}
