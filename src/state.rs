use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::exercises::{
    repo::{ExerciseCatalog, InMemoryCatalog, PgCatalog},
    seed::seed_if_empty,
};
use crate::saved::repo::{InMemoryWorkoutStore, PgWorkoutStore, WorkoutStore};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ExerciseCatalog>,
    pub workouts: Arc<dyn WorkoutStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let (catalog, workouts) = match &config.database_url {
            Some(url) => {
                let db = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(url)
                    .await
                    .context("connect to database")?;

                if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
                    warn!(error = %e, "migrations folder not found or migration failed; continuing");
                }

                info!("using postgres stores");
                (
                    Arc::new(PgCatalog::new(db.clone())) as Arc<dyn ExerciseCatalog>,
                    Arc::new(PgWorkoutStore::new(db)) as Arc<dyn WorkoutStore>,
                )
            }
            None => {
                warn!("DATABASE_URL not set; using in-memory stores");
                (
                    Arc::new(InMemoryCatalog::new()) as Arc<dyn ExerciseCatalog>,
                    Arc::new(InMemoryWorkoutStore::new()) as Arc<dyn WorkoutStore>,
                )
            }
        };

        if config.seed_catalog {
            // plans still work without a catalog, so a failed seed is not fatal
            if let Err(e) = seed_if_empty(catalog.as_ref()).await {
                warn!(error = %e, "seeding the exercise catalog failed");
            }
        }

        Ok(Self {
            catalog,
            workouts,
            config,
        })
    }

    /// Empty in-memory stores.
    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            max_connections: 1,
            seed_catalog: false,
        });
        Self {
            catalog: Arc::new(InMemoryCatalog::new()),
            workouts: Arc::new(InMemoryWorkoutStore::new()),
            config,
        }
    }

    /// In-memory stores with the built-in catalog loaded.
    #[cfg(test)]
    pub async fn fake_seeded() -> Self {
        let state = Self::fake();
        seed_if_empty(state.catalog.as_ref())
            .await
            .expect("seed in-memory catalog");
        state
    }
}
