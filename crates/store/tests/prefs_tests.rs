//! Integration tests for the JSON preference store.

use assert_matches::assert_matches;
use potaful_store::prefs::keys;
use potaful_store::{PreferenceStore, StoreError};

// ---------------------------------------------------------------------------
// Test: values survive a reopen
// ---------------------------------------------------------------------------

#[test]
fn values_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("potaful_prefs.json");

    {
        let mut store = PreferenceStore::open(&path).unwrap();
        store.save_auth_token("tok-123").unwrap();
        store.save_user_id("u-1").unwrap();
        store.save_user_name("Ana Lima").unwrap();
        store.save_user_email("ana@example.com").unwrap();
        store.save_user_location("Bandung").unwrap();
        store.set_logged_in(true).unwrap();
        store.set_onboarding_completed(true).unwrap();
    }

    let store = PreferenceStore::open(&path).unwrap();
    assert_eq!(store.auth_token(), Some("tok-123"));
    assert_eq!(store.user_id(), Some("u-1"));
    assert_eq!(store.user_name(), Some("Ana Lima"));
    assert_eq!(store.user_email(), Some("ana@example.com"));
    assert_eq!(store.user_location(), Some("Bandung"));
    assert!(store.is_logged_in());
    assert!(store.is_onboarding_completed());

    let session = store.session();
    assert_eq!(session.token(), Some("tok-123"));
    assert_eq!(session.display_name(), Some("Ana Lima"));
}

// ---------------------------------------------------------------------------
// Test: logout keeps onboarding state
// ---------------------------------------------------------------------------

#[test]
fn clear_user_data_keeps_onboarding_and_recommendation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut store = PreferenceStore::open(&path).unwrap();
    store.save_auth_token("tok").unwrap();
    store.save_user_photo("https://example.com/a.png").unwrap();
    store.save_user_location("Jakarta").unwrap();
    store.set_logged_in(true).unwrap();
    store.set_onboarding_completed(true).unwrap();
    store.save_plant_recommendation("[]").unwrap();

    store.clear_user_data().unwrap();

    let store = PreferenceStore::open(&path).unwrap();
    for key in keys::USER_DATA {
        assert!(store.get_string(key).is_none(), "{key} should be cleared");
    }
    assert!(!store.is_logged_in());
    assert!(store.is_onboarding_completed());
    assert_eq!(store.plant_recommendation(), Some("[]"));
    assert!(!store.session().is_authenticated());
}

#[test]
fn clear_all_removes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut store = PreferenceStore::open(&path).unwrap();
    store.set_onboarding_completed(true).unwrap();
    store.save_plant_recommendation("[]").unwrap();
    store.clear_all().unwrap();

    let store = PreferenceStore::open(&path).unwrap();
    assert!(!store.is_onboarding_completed());
    assert!(store.plant_recommendation().is_none());
}

// ---------------------------------------------------------------------------
// Test: file handling
// ---------------------------------------------------------------------------

#[test]
fn malformed_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    assert_matches!(PreferenceStore::open(&path), Err(StoreError::Json { .. }));
}

#[test]
fn write_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("prefs.json");

    let mut store = PreferenceStore::open(&path).unwrap();
    store.save_auth_token("tok").unwrap();

    assert!(path.exists());
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["auth_token"], "tok");
}
