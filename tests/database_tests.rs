//! Database integration tests
//!
//! Tests the persistence layer to ensure:
//! - Schema creation is idempotent and can be torn down
//! - Foreign key constraints are reported as constraint violations
//! - Queries return rows in the documented order

use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, TransactionTrait};

use tuneful::db::{
    self,
    entities::{File, Song},
    repositories::{FileRepository, SongRepository},
};
use tuneful::error::AppError;
use tuneful::test_utils::*;

#[tokio::test]
async fn test_create_schema_is_idempotent() {
    let db = setup_test_db().await;
    create_test_file(&db, "FileA").await;

    db::create_schema(&db).await.unwrap();
    db::create_schema(&db).await.unwrap();

    // Existing rows survive a repeated call
    let files = File::find().all(&db).await.unwrap();
    assert_eq!(files.len(), 1);
}

#[tokio::test]
async fn test_drop_and_recreate_schema() {
    let db = setup_test_db().await;
    let file = create_test_file(&db, "FileA").await;
    create_test_song(&db, file.id).await;

    db::drop_schema(&db).await.unwrap();
    assert!(Song::find().all(&db).await.is_err());

    db::create_schema(&db).await.unwrap();
    assert_eq!(Song::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(File::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_file() {
    let db = setup_test_db().await;

    let file = create_test_file(&db, "Blue in Green.flac").await;

    assert!(file.id > 0);
    assert_eq!(file.name, "Blue in Green.flac");
}

#[tokio::test]
async fn test_file_name_length_limit() {
    let db = setup_test_db().await;
    let files = FileRepository::new(&db);

    let longest = "a".repeat(128);
    assert!(files.create(&longest).await.is_ok());

    let too_long = "a".repeat(129);
    let result = files.create(&too_long).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_song_requires_existing_file() {
    let db = setup_test_db().await;

    let result = SongRepository::new(&db).create(99999).await;

    assert!(
        matches!(result, Err(AppError::ConstraintViolation(_))),
        "Should fail to create song with invalid file_id"
    );
    assert_eq!(Song::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_find_file_by_name_returns_first() {
    let db = setup_test_db().await;
    let first = create_test_file(&db, "FileA").await;
    create_test_file(&db, "FileA").await;

    let files = FileRepository::new(&db);

    let found = files.find_by_name("FileA").await.unwrap().unwrap();
    assert_eq!(found.id, first.id);

    assert!(files.find_by_name("filea").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_file_by_id() {
    let db = setup_test_db().await;
    let file = create_test_file(&db, "FileA").await;

    let missing_id = file.id + 1;

    let files = FileRepository::new(&db);
    assert_eq!(files.find_by_id(file.id).await.unwrap(), Some(file));
    assert_eq!(files.find_by_id(missing_id).await.unwrap(), None);
}

#[tokio::test]
async fn test_list_songs_ordered_with_files() {
    let db = setup_test_db().await;
    let file_a = create_test_file(&db, "FileA").await;
    let file_b = create_test_file(&db, "FileB").await;

    let song_b = create_test_song(&db, file_b.id).await;
    let song_a = create_test_song(&db, file_a.id).await;

    let listed = SongRepository::new(&db).list_with_files().await.unwrap();

    assert_eq!(
        listed,
        vec![(song_b, Some(file_b)), (song_a, Some(file_a))]
    );
}

#[tokio::test]
async fn test_list_songs_is_a_fresh_snapshot() {
    let db = setup_test_db().await;
    let songs = SongRepository::new(&db);

    assert!(songs.list_with_files().await.unwrap().is_empty());

    let file = create_test_file(&db, "FileA").await;
    create_test_song(&db, file.id).await;

    assert_eq!(songs.list_with_files().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rolled_back_transaction_leaves_no_song() {
    let db = setup_test_db().await;
    let file = create_test_file(&db, "FileA").await;

    let txn = db.begin().await.unwrap();
    SongRepository::new(&txn).create(file.id).await.unwrap();
    txn.rollback().await.unwrap();

    assert_eq!(Song::find().all(&db).await.unwrap().len(), 0);
}
