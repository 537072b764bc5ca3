use anyhow::Context;
use axum::async_trait;
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::workouts::dto::WorkoutPlan;

use super::dto::SavedWorkout;

#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Newest first.
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<SavedWorkout>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<SavedWorkout>>;
    async fn create(&self, plan: WorkoutPlan) -> anyhow::Result<SavedWorkout>;
    /// `false` when no workout had that id.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Debug, FromRow)]
struct SavedWorkoutRow {
    id: Uuid,
    name: String,
    plan: Json<WorkoutPlan>,
    created_at: OffsetDateTime,
}

impl From<SavedWorkoutRow> for SavedWorkout {
    fn from(row: SavedWorkoutRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            plan: row.plan.0,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PgWorkoutStore {
    db: PgPool,
}

impl PgWorkoutStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkoutStore for PgWorkoutStore {
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<SavedWorkout>> {
        let rows = sqlx::query_as::<_, SavedWorkoutRow>(
            r#"
            SELECT id, name, plan, created_at
            FROM saved_workouts
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list saved workouts")?;
        Ok(rows.into_iter().map(SavedWorkout::from).collect())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<SavedWorkout>> {
        let row = sqlx::query_as::<_, SavedWorkoutRow>(
            "SELECT id, name, plan, created_at FROM saved_workouts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get saved workout")?;
        Ok(row.map(SavedWorkout::from))
    }

    async fn create(&self, plan: WorkoutPlan) -> anyhow::Result<SavedWorkout> {
        let row = sqlx::query_as::<_, SavedWorkoutRow>(
            r#"
            INSERT INTO saved_workouts (id, name, plan)
            VALUES ($1, $2, $3)
            RETURNING id, name, plan, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&plan.name)
        .bind(Json(&plan))
        .fetch_one(&self.db)
        .await
        .context("insert saved workout")?;
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM saved_workouts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete saved workout")?;
        Ok(res.rows_affected() > 0)
    }
}

/// Process-local store for development mode and tests.
#[derive(Default)]
pub struct InMemoryWorkoutStore {
    rows: RwLock<Vec<SavedWorkout>>,
}

impl InMemoryWorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkoutStore for InMemoryWorkoutStore {
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<SavedWorkout>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<SavedWorkout>> {
        Ok(self.rows.read().await.iter().find(|w| w.id == id).cloned())
    }

    async fn create(&self, plan: WorkoutPlan) -> anyhow::Result<SavedWorkout> {
        let saved = SavedWorkout {
            id: Uuid::new_v4(),
            name: plan.name.clone(),
            plan,
            created_at: OffsetDateTime::now_utc(),
        };
        self.rows.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|w| w.id != id);
        Ok(rows.len() < before)
    }
}
