use sqlx::{Error as SqlxError, PgExecutor};
use tracing::{info, instrument};

use crate::models::category::{CreateCategoryRequest, ResourceCategory};
use crate::models::resource::{NewResource, ResourceRow};

#[instrument(skip_all)]
pub async fn create_category<'a, E: PgExecutor<'a>>(
    executor: E,
    category: &CreateCategoryRequest,
) -> Result<ResourceCategory, SqlxError> {
    let result: ResourceCategory = sqlx::query_as(
        "
            INSERT INTO resource_categories (name, description)
            VALUES ($1, $2) RETURNING id, name, description;
        ",
    )
    .bind(&category.name)
    .bind(&category.description)
    .fetch_one(executor)
    .await?;
    info!("created resource category `{}` with id: {}", result.name, result.id);
    Ok(result)
}

#[instrument(skip_all)]
pub async fn create_resource<'a, E: PgExecutor<'a>>(
    executor: E,
    resource: &NewResource,
) -> Result<ResourceRow, SqlxError> {
    let result: ResourceRow = sqlx::query_as(
        "
            INSERT INTO resources (title, description, category_id, file_path, file_name, file_size, file_type, tags, is_pack, pack_size, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, current_timestamp)
            RETURNING id, title, description, category_id, file_path, file_name, file_size, file_type, tags, is_pack, pack_size, created_at;
        ",
    )
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(resource.category_id)
        .bind(&resource.file_path)
        .bind(&resource.file_name)
        .bind(resource.file_size)
        .bind(&resource.file_type)
        .bind(&resource.tags)
        .bind(resource.is_pack)
        .bind(resource.pack_size)
        .fetch_one(executor)
        .await?;
    info!("created resource with id: {}", result.id);
    Ok(result)
}
