use sqlx::{Error as SqlxError, Postgres, Transaction};
use tracing::{info, instrument};

use crate::database::commands::create_category;
use crate::database::connection::DbConnection;
use crate::models::category::default_categories;

impl DbConnection {
    pub async fn create_all(&self) -> Result<(), SqlxError> {
        let mut transaction = self.pool().begin().await?;
        create_all_tables(&mut transaction).await?;
        create_default_categories(&mut transaction).await?;
        transaction.commit().await?;
        Ok(())
    }
    pub async fn schema_exists(&self) -> Result<bool, SqlxError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = 'resources');",
        )
        .fetch_one(self.pool())
        .await?;
        Ok(exists)
    }
    pub async fn drop_all(&self) -> Result<(), SqlxError> {
        let mut transaction = self.pool().begin().await?;
        drop_all_tables(&mut transaction).await?;
        transaction.commit().await?;
        Ok(())
    }
}

#[instrument(skip_all)]
pub async fn create_all_tables(
    transaction: &mut Transaction<'_, Postgres>,
) -> Result<(), SqlxError> {
    sqlx::query(
        "
            CREATE TABLE resource_categories (
                id              uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                name            VARCHAR(100) NOT NULL UNIQUE,
                description     TEXT NOT NULL DEFAULT ''
            );
        ",
    )
    .execute(transaction.as_mut())
    .await?;
    sqlx::query(
        "
            CREATE TABLE resources (
                id              uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                title           VARCHAR(255) NOT NULL,
                description     TEXT NOT NULL DEFAULT '',
                category_id     uuid NOT NULL REFERENCES resource_categories(id),
                file_path       VARCHAR(512) NOT NULL UNIQUE,
                file_name       VARCHAR(255) NOT NULL,
                file_size       BIGINT NOT NULL,
                file_type       VARCHAR(255) NOT NULL,
                tags            TEXT[] NOT NULL DEFAULT '{}',
                is_pack         BOOLEAN NOT NULL DEFAULT FALSE,
                pack_size       INTEGER NOT NULL DEFAULT 1,
                created_at      TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT current_timestamp
            );
        ",
    )
    .execute(transaction.as_mut())
    .await?;
    sqlx::query("CREATE INDEX resources_created_at_idx ON resources (created_at DESC);")
        .execute(transaction.as_mut())
        .await?;
    Ok(())
}

#[instrument(skip_all)]
pub async fn drop_all_tables(transaction: &mut Transaction<'_, Postgres>) -> Result<(), SqlxError> {
    let statements = [
        "DROP TABLE IF EXISTS resources;",
        "DROP TABLE IF EXISTS resource_categories;",
    ];
    for statement in &statements {
        sqlx::query(statement).execute(transaction.as_mut()).await?;
    }
    Ok(())
}

#[instrument(skip_all)]
pub async fn create_default_categories(
    transaction: &mut Transaction<'_, Postgres>,
) -> Result<(), SqlxError> {
    for category in default_categories() {
        create_category(transaction.as_mut(), &category).await?;
    }
    info!("seeded default resource categories");
    Ok(())
}
