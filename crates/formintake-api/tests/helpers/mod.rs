//! Test helpers: build AppState and router for integration tests.
//!
//! Uses the in-memory submission store and a temporary uploads/public
//! directory, so no database is needed.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use formintake_api::setup::routes;
use formintake_api::state::AppState;
use formintake_core::{BaseConfig, Config, FormServiceConfig};
use formintake_db::test_helpers::InMemorySubmissionStore;
use formintake_db::SubmissionStore;
use formintake_storage::{LocalStorage, Storage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const INDEX_HTML: &str = "<!doctype html><title>Form</title><form></form>";

/// Test application: server, store handle, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    /// Shares documents with the store the router uses; `None` when the app
    /// runs without a database.
    pub store: Option<InMemorySubmissionStore>,
    pub uploads_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn store(&self) -> &InMemorySubmissionStore {
        self.store.as_ref().expect("test app has a store")
    }

    /// Names of the files currently in the uploads directory.
    pub fn uploaded_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.uploads_dir)
            .expect("read uploads dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

/// App backed by a working in-memory store.
pub async fn setup_test_app() -> TestApp {
    build_test_app(Some(InMemorySubmissionStore::new())).await
}

/// App whose store fails every call, as if the database went away.
pub async fn setup_test_app_with_failing_store() -> TestApp {
    build_test_app(Some(InMemorySubmissionStore::failing())).await
}

/// App started without any store, as after a failed database connection.
pub async fn setup_test_app_without_store() -> TestApp {
    build_test_app(None).await
}

async fn build_test_app(store: Option<InMemorySubmissionStore>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let uploads_dir = temp_dir.path().join("uploads");
    let public_dir = temp_dir.path().join("public");
    std::fs::create_dir_all(&public_dir).expect("create public dir");
    std::fs::write(public_dir.join("index.html"), INDEX_HTML).expect("write index.html");

    let config = create_test_config(&uploads_dir, &public_dir);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&uploads_dir, config.uploads_url_prefix().to_string())
            .await
            .expect("Failed to create local storage"),
    );

    let app_store = store.clone().map(|s| {
        let s: Arc<dyn SubmissionStore> = Arc::new(s);
        s
    });

    let state = Arc::new(AppState::new(config.clone(), app_store, storage));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        store,
        uploads_dir,
        _temp_dir: temp_dir,
    }
}

fn create_test_config(uploads_dir: &Path, public_dir: &Path) -> Config {
    let base = BaseConfig {
        server_port: 45,
        cors_origins: vec!["*".to_string()],
        db_max_connections: 1,
        db_timeout_seconds: 1,
        environment: "test".to_string(),
    };
    Config(Box::new(FormServiceConfig {
        base,
        database_url: "postgresql://localhost:5432/form_test".to_string(),
        uploads_dir: uploads_dir.to_string_lossy().into_owned(),
        uploads_url_prefix: "/uploads".to_string(),
        public_dir: public_dir.to_string_lossy().into_owned(),
        max_upload_size_bytes: 1024 * 1024,
    }))
}
