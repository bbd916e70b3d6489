//! SQLite store tests against a temporary database file

use skillindex_persistence::{KeyValueStore, SqliteStore};

fn db_path(dir: &tempfile::TempDir) -> String {
    dir.path().join("cache.db").to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_get_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(&db_path(&dir)).await.unwrap();

    assert!(store.get("github-stars:nobody/nothing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_then_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(&db_path(&dir)).await.unwrap();

    store.set("key", r#"{"stars":1,"timestamp":1}"#).await.unwrap();
    store.set("key", r#"{"stars":2,"timestamp":2}"#).await.unwrap();

    assert_eq!(
        store.get("key").await.unwrap().as_deref(),
        Some(r#"{"stars":2,"timestamp":2}"#)
    );
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = db_path(&dir);

    let store = SqliteStore::new(&path).await.unwrap();
    store.set("persisted", "value").await.unwrap();
    store.close().await;

    let reopened = SqliteStore::new(&path).await.unwrap();
    assert_eq!(
        reopened.get("persisted").await.unwrap().as_deref(),
        Some("value")
    );
}

#[tokio::test]
async fn test_clear_removes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(&db_path(&dir)).await.unwrap();

    store.set("a", "1").await.unwrap();
    store.set("b", "2").await.unwrap();
    store.clear().await.unwrap();

    assert_eq!(store.len().await.unwrap(), 0);
    assert!(store.get("a").await.unwrap().is_none());
}
