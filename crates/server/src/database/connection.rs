use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Error as SqlxError;
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DbConfig {
    username: String,
    password: String,
    dbname: String,
    address: Option<String>,
    max_connections: Option<u32>,
    acquire_timeout_secs: Option<u64>,
}

impl DbConfig {
    const ADDRESS_FALLBACK: &'static str = "localhost";
    const MAX_CONN_FALLBACK: u32 = 5;
    const ACQUIRE_TIMEOUT_FALLBACK: Duration = Duration::from_secs(10);

    #[cfg(test)]
    pub fn development(dbname: &str, username: &str, password: &str) -> Self {
        Self {
            dbname: dbname.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            address: None,
            max_connections: None,
            acquire_timeout_secs: None,
        }
    }

    pub fn get_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}/{}",
            self.username,
            self.password,
            self.address.as_deref().unwrap_or(Self::ADDRESS_FALLBACK),
            self.dbname,
        )
    }
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(Self::MAX_CONN_FALLBACK)
    }
    pub fn acquire_timeout(&self) -> Duration {
        self.acquire_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(Self::ACQUIRE_TIMEOUT_FALLBACK)
    }
}

#[derive(Clone)]
pub struct DbConnection {
    pool: PgPool,
}

impl DbConnection {
    pub async fn connect(config: &DbConfig) -> Result<Self, SqlxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.get_url())
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates and seeds the schema unless the catalog tables already exist.
    pub async fn ensure_schema(&self) -> Result<(), SqlxError> {
        if self.schema_exists().await? {
            return Ok(());
        }
        info!("catalog tables not found, creating schema");
        self.create_all().await
    }
}
