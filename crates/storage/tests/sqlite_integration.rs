use chrono::Duration;
use companion_core::time::fixed_now;
use storage::repository::{StateEntry, StateRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_persists_state_entry() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let entry = StateEntry::new("wasisteinmensch::state::v1", "{\"version\":1}", fixed_now());
    repo.put_entry(&entry).await.expect("put");

    let fetched = repo
        .get_entry("wasisteinmensch::state::v1")
        .await
        .expect("get")
        .expect("entry present");
    assert_eq!(fetched, entry);
}

#[tokio::test]
async fn sqlite_upsert_replaces_value_and_timestamp() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_upsert?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let later = fixed_now() + Duration::minutes(3);

    storage
        .state
        .put_entry(&StateEntry::new("k", "first", fixed_now()))
        .await
        .unwrap();
    storage
        .state
        .put_entry(&StateEntry::new("k", "second", later))
        .await
        .unwrap();

    let fetched = storage.state.get_entry("k").await.unwrap().unwrap();
    assert_eq!(fetched.value, "second");
    assert_eq!(fetched.updated_at, later);
}

#[tokio::test]
async fn sqlite_delete_and_missing_keys() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_delete?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // Migrations are idempotent.
    repo.migrate().await.expect("migrate twice");

    assert!(repo.get_entry("absent").await.unwrap().is_none());

    repo.put_entry(&StateEntry::new("k", "v", fixed_now()))
        .await
        .unwrap();
    repo.delete_entry("k").await.unwrap();
    repo.delete_entry("k").await.unwrap();
    assert!(repo.get_entry("k").await.unwrap().is_none());
}
