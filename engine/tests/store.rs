use dicecup_engine::store::{LAST_ROLL_KEY, THEME_KEY};
use dicecup_engine::{FileStore, KeyValueStore, MemoryStore, Persistence, RollResult, StoreError, Theme};
use proptest::prelude::*;
use tempfile::TempDir;

fn roll(values: &[u8]) -> RollResult {
    RollResult::new(values.to_vec()).unwrap()
}

#[test]
fn last_roll_is_stored_as_json_array() {
    let mut p = Persistence::new(MemoryStore::new());
    p.save_last_roll(&roll(&[3, 6, 1, 4])).unwrap();
    assert_eq!(p.store().get(LAST_ROLL_KEY), Some("[3,6,1,4]"));
}

#[test]
fn new_roll_overwrites_and_clear_removes() {
    let mut p = Persistence::new(MemoryStore::new());
    p.save_last_roll(&roll(&[1, 2])).unwrap();
    p.save_last_roll(&roll(&[5])).unwrap();
    assert_eq!(p.load_last_roll().unwrap(), Some(roll(&[5])));
    assert_eq!(p.store().len(), 1);

    p.clear_last_roll().unwrap();
    assert_eq!(p.load_last_roll().unwrap(), None);
    p.clear_last_roll().unwrap();
}

#[test]
fn theme_is_stored_as_literal_string() {
    let mut p = Persistence::new(MemoryStore::new());
    assert_eq!(p.load_theme().unwrap(), None);
    p.save_theme(Theme::Light).unwrap();
    assert_eq!(p.store().get(THEME_KEY), Some("light"));
    assert_eq!(p.load_theme().unwrap(), Some(Theme::Light));
    p.save_theme(Theme::Dark).unwrap();
    assert_eq!(p.store().get(THEME_KEY), Some("dark"));
}

#[test]
fn bad_records_are_reported() {
    let mut store = MemoryStore::new();
    store.set(LAST_ROLL_KEY, "not json".into()).unwrap();
    store.set(THEME_KEY, "sepia".into()).unwrap();
    let mut p = Persistence::new(store);
    assert!(matches!(p.load_last_roll(), Err(StoreError::Decode { .. })));
    assert!(matches!(p.load_theme(), Err(StoreError::Invalid { .. })));

    let mut store = p.into_inner();
    store.set(LAST_ROLL_KEY, "[1,9]".into()).unwrap();
    p = Persistence::new(store);
    assert!(matches!(p.load_last_roll(), Err(StoreError::Invalid { .. })));
}

#[test]
fn file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let mut p = Persistence::new(FileStore::open(&path).unwrap());
    p.save_last_roll(&roll(&[2, 4, 6])).unwrap();
    p.save_theme(Theme::Light).unwrap();
    drop(p);

    let p = Persistence::new(FileStore::open(&path).unwrap());
    assert_eq!(p.load_last_roll().unwrap(), Some(roll(&[2, 4, 6])));
    assert_eq!(p.load_theme().unwrap(), Some(Theme::Light));
}

#[test]
fn file_store_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    let mut store = FileStore::open(&path).unwrap();
    assert_eq!(store.get(LAST_ROLL_KEY), None);
    store.remove(LAST_ROLL_KEY).unwrap();
    assert!(!path.exists(), "removing nothing must not create the file");
}

#[test]
fn file_store_keeps_old_contents_when_a_write_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let mut store = FileStore::open(&path).unwrap();
    store.set(THEME_KEY, "dark".into()).unwrap();

    // a directory where the temp file goes makes the next write fail
    std::fs::create_dir(dir.path().join("store.json.tmp")).unwrap();
    assert!(matches!(
        store.set(THEME_KEY, "light".into()),
        Err(StoreError::Io { .. })
    ));
    assert!(store.remove(THEME_KEY).is_err());
    assert_eq!(store.get(THEME_KEY), Some("dark"));

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(THEME_KEY), Some("dark"));
}

#[test]
fn file_store_rejects_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(matches!(
        FileStore::open(&path),
        Err(StoreError::CorruptFile { .. })
    ));
}

proptest! {
    #[test]
    fn last_roll_round_trips(values in prop::collection::vec(1u8..=6, 1..=12)) {
        let mut p = Persistence::new(MemoryStore::new());
        let original = roll(&values);
        p.save_last_roll(&original).unwrap();
        prop_assert_eq!(p.load_last_roll().unwrap(), Some(original));
    }
}
