use std::sync::Arc;

use once_cell::sync::Lazy;
use tokio::sync::Mutex;

use crate::catalog::service::ResourceCatalog;
use crate::catalog::CatalogStore;
use crate::config::UploadErrorPolicy;
use crate::database::connection::{DbConfig, DbConnection};
use crate::models::category::CategoryFilter;
use crate::models::resource::UploadFile;
use crate::storage::memory::MemoryBlobStore;

/// Some tests can't run in parallel, prevent them from breaking each other's state
static SERIAL_LOCK: Lazy<Mutex<()>> = Lazy::new(Mutex::default);

async fn init_and_get_db() -> DbConnection {
    let _ = tracing_subscriber::fmt::try_init();

    let config = DbConfig::development("resource_hub_db", "resource_hub", "resourcehubpass");
    let db = DbConnection::connect(&config).await.unwrap();
    db.drop_all().await.unwrap();
    db.create_all().await.unwrap();
    db
}

#[tokio::test]
#[ignore = "requires a local postgres with the resource_hub role"]
async fn schema_is_seeded_and_sorted() {
    let _lock = SERIAL_LOCK.lock().await;
    let db = init_and_get_db().await;

    assert!(db.schema_exists().await.unwrap());
    let names: Vec<String> = db
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Newsletters", "Quiz Packs", "Reminiscence Materials"]);

    // re-running on an existing schema is a no-op
    db.ensure_schema().await.unwrap();
    assert_eq!(db.list_categories().await.unwrap().len(), 3);
}

#[tokio::test]
#[ignore = "requires a local postgres with the resource_hub role"]
async fn upload_round_trips_through_postgres() {
    let _lock = SERIAL_LOCK.lock().await;
    let db = init_and_get_db().await;
    let categories = db.list_categories().await.unwrap();
    let quizzes = categories.iter().find(|c| c.name == "Quiz Packs").unwrap();
    let blobs = Arc::new(MemoryBlobStore::new());
    let catalog = ResourceCatalog::new(
        Arc::new(db.clone()),
        blobs.clone(),
        UploadErrorPolicy::Abort,
    );

    let report = catalog
        .upload(
            vec![
                UploadFile::new("Seaside Quiz.pdf", Some("application/pdf"), b"waves".to_vec()),
                UploadFile::new("Music Round.pdf", Some("application/pdf"), b"tunes".to_vec()),
            ],
            Some(CategoryFilter::Category(quizzes.id)),
        )
        .await
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(blobs.len(), 2);

    let listed = catalog.list_resources().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|r| &r.category == quizzes));
    assert!(listed.iter().all(|r| r.row.tags.is_empty() && r.row.pack_size == 1));
    assert!(listed[0].row.created_at >= listed[1].row.created_at);

    let row = db.get_resource_row(listed[0].row.id).await.unwrap().unwrap();
    assert_eq!(row, listed[0].row);
    assert!(db
        .get_resource_row(uuid::Uuid::new_v4())
        .await
        .unwrap()
        .is_none());

    let download = catalog.download(row.id).await.unwrap();
    assert_eq!(download.file_name, row.file_name);
}
