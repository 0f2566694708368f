//! Test utilities for Tuneful
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - Per-test upload folders
//! - AppState factories
//! - Catalog fixtures

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use sea_orm::{Database, DatabaseConnection};

use crate::{
    config::{Config, Profile},
    db::{
        self,
        entities::{file, song},
        repositories::{FileRepository, SongRepository},
    },
    state::AppState,
};

/// Global counter for test isolation
static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Get a unique test ID for this test
pub fn get_test_id() -> u32 {
    TEST_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Setup an in-memory SQLite database with the schema created
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    db::create_schema(&db)
        .await
        .expect("Failed to create schema");

    db
}

/// Upload folder unique to this process and test
pub fn test_upload_folder() -> PathBuf {
    std::env::temp_dir().join(format!(
        "tuneful-test-uploads-{}-{}",
        std::process::id(),
        get_test_id()
    ))
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        profile: Profile::Testing,
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 8080,
        upload_folder: test_upload_folder(),
    }
}

/// Create a complete test AppState with an isolated database and upload folder
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    let config = test_config();

    tokio::fs::create_dir_all(&config.upload_folder)
        .await
        .expect("Failed to create test upload folder");

    AppState::new(db, config)
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test file in the database
pub async fn create_test_file(db: &DatabaseConnection, name: &str) -> file::Model {
    FileRepository::new(db)
        .create(name)
        .await
        .expect("Failed to insert test file")
}

/// Create a test song referencing an existing file
pub async fn create_test_song(db: &DatabaseConnection, file_id: i32) -> song::Model {
    SongRepository::new(db)
        .create(file_id)
        .await
        .expect("Failed to insert test song")
}
