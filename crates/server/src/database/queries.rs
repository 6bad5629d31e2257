use sqlx::{Error as SqlxError, PgExecutor};
use tracing::instrument;

use crate::database::utils::map_not_found_as_none;
use crate::models::category::{CategoryId, ResourceCategory};
use crate::models::resource::{ResourceId, ResourceRow};

#[instrument(skip(executor))]
pub async fn list_categories<'a, E: PgExecutor<'a>>(
    executor: E,
) -> Result<Vec<ResourceCategory>, SqlxError> {
    sqlx::query_as(
        "
    SELECT
        id, name, description
    FROM
        resource_categories
    ORDER BY
        name ASC;
    ",
    )
    .fetch_all(executor)
    .await
}

#[instrument(skip(executor))]
pub async fn get_category<'a, E: PgExecutor<'a>>(
    executor: E,
    id: CategoryId,
) -> Result<Option<ResourceCategory>, SqlxError> {
    map_not_found_as_none(
        sqlx::query_as("SELECT id, name, description FROM resource_categories WHERE id = $1;")
            .bind(id)
            .fetch_one(executor)
            .await,
    )
}

#[instrument(skip(executor))]
pub async fn list_resources<'a, E: PgExecutor<'a>>(
    executor: E,
) -> Result<Vec<ResourceRow>, SqlxError> {
    sqlx::query_as(
        "
    SELECT
        id, title, description, category_id, file_path, file_name, file_size, file_type,
        tags, is_pack, pack_size, created_at
    FROM
        resources
    ORDER BY
        created_at DESC, id;
    ",
    )
    .fetch_all(executor)
    .await
}

#[instrument(skip(executor))]
pub async fn get_resource<'a, E: PgExecutor<'a>>(
    executor: E,
    id: ResourceId,
) -> Result<Option<ResourceRow>, SqlxError> {
    map_not_found_as_none(
        sqlx::query_as(
            "
    SELECT
        id, title, description, category_id, file_path, file_name, file_size, file_type,
        tags, is_pack, pack_size, created_at
    FROM
        resources
    WHERE
        id = $1;
    ",
        )
        .bind(id)
        .fetch_one(executor)
        .await,
    )
}
