mod common;

use common::temp_storage;
use spinwheel::config::AdminConfig;
use spinwheel::service::bootstrap::seed_admin;
use spinwheel::service::password::verify_password;
use std::fs;

#[tokio::test]
async fn schema_init_is_idempotent() {
    let (storage, path) = temp_storage("schema").await;
    storage.add_name("Persisted").await.unwrap();
    storage.init_schema().await.unwrap();
    assert_eq!(storage.list_names().await.unwrap(), vec!["Persisted"]);
    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn seed_admin_only_runs_on_an_empty_user_table() {
    let (storage, path) = temp_storage("seed").await;
    let admin = AdminConfig {
        username: "root".to_string(),
        password: "s3cret-pass".to_string(),
    };

    assert!(seed_admin(&storage, &admin).await.unwrap());
    assert!(!seed_admin(&storage, &AdminConfig::default()).await.unwrap());
    assert_eq!(storage.count_users().await.unwrap(), 1);

    let user = storage.find_user_by_username("root").await.unwrap().unwrap();
    assert_ne!(user.password_hash, "s3cret-pass");
    assert!(verify_password("s3cret-pass", &user.password_hash).await.unwrap());
    assert!(storage.find_user_by_username("admin").await.unwrap().is_none());
    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn import_dedups_against_store_and_within_batch() {
    let (storage, path) = temp_storage("import").await;
    storage.add_name("Alice").await.unwrap();

    let batch: Vec<String> = ["Bob", "Alice", "Bob", "Cy"].map(String::from).to_vec();
    assert_eq!(storage.import_names(&batch).await.unwrap(), 2);
    assert_eq!(
        storage.list_names().await.unwrap(),
        vec!["Alice", "Bob", "Cy"]
    );
    assert_eq!(storage.import_names(&batch).await.unwrap(), 0);
    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn config_row_is_get_or_create() {
    let (storage, path) = temp_storage("config").await;
    assert!(storage.wheel_config().await.unwrap().is_none());
    assert_eq!(storage.take_locked_result().await.unwrap(), None);

    storage.set_locked_result(Some("A")).await.unwrap();
    storage.set_locked_result(Some("B")).await.unwrap();
    let cfg = storage.wheel_config().await.unwrap().unwrap();
    assert_eq!(cfg.locked_result.as_deref(), Some("B"));

    let rows: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wheel_config")
        .fetch_one(storage.pool())
        .await
        .unwrap();
    assert_eq!(rows.0, 1);

    assert_eq!(storage.take_locked_result().await.unwrap().as_deref(), Some("B"));
    assert_eq!(storage.take_locked_result().await.unwrap(), None);
    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn empty_string_lock_is_not_consumed() {
    let (storage, path) = temp_storage("config-empty").await;
    storage.set_locked_result(Some("")).await.unwrap();

    assert_eq!(storage.take_locked_result().await.unwrap(), None);
    let cfg = storage.wheel_config().await.unwrap().unwrap();
    assert_eq!(cfg.locked_result.as_deref(), Some(""));
    assert_eq!(cfg.pending_lock(), None);
    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn mutations_on_missing_rows_affect_nothing() {
    let (storage, path) = temp_storage("noop").await;
    assert_eq!(storage.rename_by_id(42, "x").await.unwrap(), 0);
    assert_eq!(storage.delete_name_by_id(42).await.unwrap(), 0);
    assert_eq!(storage.delete_names_by_value("x").await.unwrap(), 0);
    let _ = fs::remove_file(path);
}
