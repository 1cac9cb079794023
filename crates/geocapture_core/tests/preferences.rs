use geocapture_core::config::DARK_MODE_KEY;
use geocapture_core::{JsonFilePreferenceStore, PreferenceError, PreferenceStore};

#[test]
fn missing_file_reads_as_unset() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFilePreferenceStore::open(dir.path().join("preferences.json"));

    assert_eq!(store.load_dark_mode().unwrap(), None);
    assert!(!store.path().exists());
}

#[test]
fn saved_flag_is_visible_to_a_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences.json");

    let mut store = JsonFilePreferenceStore::open(&path);
    store.save_dark_mode(true).unwrap();

    let reopened = JsonFilePreferenceStore::open(&path);
    assert_eq!(reopened.load_dark_mode().unwrap(), Some(true));
    assert_eq!(
        reopened.get_item(DARK_MODE_KEY).unwrap().as_deref(),
        Some("true")
    );
}

#[test]
fn save_overwrites_in_place_and_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let mut store = JsonFilePreferenceStore::open(&path);

    store.set_item("lastScreen", "\"home\"").unwrap();
    store.save_dark_mode(true).unwrap();
    store.save_dark_mode(false).unwrap();

    assert_eq!(store.load_dark_mode().unwrap(), Some(false));
    assert_eq!(
        store.get_item("lastScreen").unwrap().as_deref(),
        Some("\"home\"")
    );
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn corrupt_file_fails_reads_and_is_replaced_by_next_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{not json").unwrap();
    let mut store = JsonFilePreferenceStore::open(&path);

    let err = store.load_dark_mode().unwrap_err();
    assert!(matches!(err, PreferenceError::Encoding { .. }));

    store.save_dark_mode(true).unwrap();
    assert_eq!(store.load_dark_mode().unwrap(), Some(true));
}
