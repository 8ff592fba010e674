use countup_core::db::{open_db, open_db_in_memory};
use countup_core::{
    KeyValueStore, MemoryKeyValueStore, MilestoneRepository, MilestoneSet, SqliteKeyValueStore,
    StoreError,
};

const KEY: &str = "celebratedMilestones";

#[test]
fn saved_set_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countup.sqlite3");
    let saved: MilestoneSet = [1, 2, 3].into_iter().collect();

    {
        let conn = open_db(&path).unwrap();
        let repo = MilestoneRepository::new(SqliteKeyValueStore::new(&conn), KEY);
        repo.save(&saved).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = MilestoneRepository::new(SqliteKeyValueStore::new(&conn), KEY);
    assert_eq!(repo.load(), saved);
}

#[test]
fn missing_entry_loads_as_empty_set() {
    let conn = open_db_in_memory().unwrap();
    let repo = MilestoneRepository::new(SqliteKeyValueStore::new(&conn), KEY);

    assert!(repo.try_load().unwrap().is_none());
    assert!(repo.load().is_empty());
}

#[test]
fn corrupted_entry_loads_as_empty_set_without_error() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    store.put(KEY, "{not json").unwrap();
    let repo = MilestoneRepository::new(store, KEY);

    assert!(matches!(
        repo.try_load().unwrap_err(),
        StoreError::Corrupt { .. }
    ));
    assert_eq!(repo.load(), MilestoneSet::new());
}

#[test]
fn save_replaces_entry_wholesale() {
    let store = MemoryKeyValueStore::new();
    let repo = MilestoneRepository::new(&store, KEY);

    repo.save(&[1, 2, 3, 6, 12].into_iter().collect()).unwrap();
    repo.save(&[4].into_iter().collect()).unwrap();

    assert_eq!(store.get(KEY).unwrap().as_deref(), Some("[4]"));
}

#[test]
fn entries_under_other_keys_are_untouched() {
    let store = MemoryKeyValueStore::new();
    store.put("theme", "ocean").unwrap();
    let repo = MilestoneRepository::new(&store, KEY);

    repo.save(&[1].into_iter().collect()).unwrap();

    assert_eq!(store.get("theme").unwrap().as_deref(), Some("ocean"));
}
