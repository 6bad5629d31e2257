use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::catalog::search::{search, ResourceFilter};
use crate::catalog::upload::UploadReport;
use crate::catalog::view::{CatalogView, CategorySummary, Notice};
use crate::error::{NoticedError, RequestError, ValidationError};
use crate::models::category::{CategoryFilter, ResourceCategory};
use crate::models::listing::SearchQuery;
use crate::models::resource::{Resource, ResourceId, UploadFile};
use crate::server::state::AppState;

const CATEGORY_FIELD: &str = "category_id";
const FILES_FIELD: &str = "files";
const DOWNLOAD_FAILED: &str = "Failed to download file";

pub fn router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;
    Router::new()
        .route("/categories", get(list_categories))
        .route("/resources", get(list_resources).post(upload_resources))
        .route("/resources/overview", get(overview))
        .route("/resources/:id/download", get(download))
        .route("/uploads/in-flight", get(in_flight))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = state.config.server.address.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("starting server on: {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ResourceCategory>>, RequestError> {
    Ok(Json(state.catalog.list_categories().await?))
}

pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Resource>>, RequestError> {
    let filter = ResourceFilter::from_query(query)?;
    debug!(
        "searching resources for `{}` in {:?}",
        filter.term(),
        filter.category()
    );
    let resources = state.catalog.list_resources().await?;
    Ok(Json(search(&resources, &filter).to_vec()))
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub categories: Vec<CategorySummary>,
    pub resources: Vec<Resource>,
    pub notices: Vec<Notice>,
}

pub async fn overview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<OverviewResponse>, RequestError> {
    let filter = ResourceFilter::from_query(query)?;
    let view = CatalogView::load(&state.catalog).await;
    let resources = view.filtered(&filter).to_vec();
    Ok(Json(OverviewResponse {
        categories: view.overview(),
        resources,
        notices: view.notices,
    }))
}

pub async fn upload_resources(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadReport>, RequestError> {
    let mut category = None;
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(CATEGORY_FIELD) => {
                category = Some(field.text().await?.parse::<CategoryFilter>()?);
            }
            Some(FILES_FIELD) => {
                let file_name = match field.file_name() {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => {
                        return Err(ValidationError::InvalidInput {
                            value: FILES_FIELD.to_string(),
                            reason: "file name is required".to_string(),
                        }
                        .into())
                    }
                };
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?.to_vec();
                files.push(UploadFile::new(file_name, content_type.as_deref(), bytes));
            }
            _ => {}
        }
    }
    Ok(Json(state.catalog.upload(files, category).await?))
}

pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ResourceId>,
) -> Result<impl IntoResponse, NoticedError> {
    let download = state
        .catalog
        .download(id)
        .await
        .map_err(|e| {
            error!("download of resource {id} failed: {e}");
            e.with_notice(Notice::error(DOWNLOAD_FAILED))
        })?;
    let file_name: String = download
        .file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let disposition = format!("attachment; filename=\"{file_name}\"");
    Ok((
        [
            (header::CONTENT_TYPE, download.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.bytes,
    ))
}

pub async fn in_flight(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.catalog.in_flight())
}
