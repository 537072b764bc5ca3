use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Unset means development mode with in-memory stores.
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Insert the built-in catalog into an empty store at start-up.
    pub seed_catalog: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let seed_catalog = std::env::var("SEED_CATALOG")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);
        Ok(Self {
            database_url,
            max_connections,
            seed_catalog,
        })
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
