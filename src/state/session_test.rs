use super::*;
use crate::util::storage::{KeyValueStorage, StorageError};
use serde_json::json;

fn ana() -> UserProfile {
    serde_json::from_value(json!({ "name": "Ana", "id": 7 })).unwrap()
}

/// Storage that refuses every write but reads as empty.
struct ReadOnlyStorage;

impl KeyValueStorage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write { key: key.to_owned() })
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

// =============================================================
// Hydration round-trips
// =============================================================

#[test]
fn persisted_session_survives_rehydration() {
    let storage = MemoryStorage::shared();
    let mut store = SessionStore::hydrate(storage.clone());
    store.set_session("T1", ana(), true).unwrap();

    let reloaded = SessionStore::hydrate(storage);
    assert_eq!(reloaded.token(), Some("T1"));
    assert_eq!(reloaded.user(), Some(&ana()));
    assert!(reloaded.session().persisted);
}

#[test]
fn memory_only_session_is_lost_on_rehydration() {
    let storage = MemoryStorage::shared();
    let mut store = SessionStore::hydrate(storage.clone());
    store.set_session("T1", ana(), false).unwrap();
    assert_eq!(store.token(), Some("T1"));
    assert!(!store.session().persisted);

    let reloaded = SessionStore::hydrate(storage);
    assert_eq!(reloaded.session(), &Session::default());
}

#[test]
fn memory_only_session_erases_previous_persisted_one() {
    let storage = MemoryStorage::shared();
    let mut store = SessionStore::hydrate(storage.clone());
    store.set_session("OLD", ana(), true).unwrap();
    store.set_session("NEW", ana(), false).unwrap();

    assert_eq!(storage.get(TOKEN_KEY), Ok(None));
    assert!(!SessionStore::hydrate(storage).is_authenticated());
}

#[test]
fn clear_session_then_rehydrate_is_empty() {
    let storage = MemoryStorage::shared();
    let mut store = SessionStore::hydrate(storage.clone());
    store.set_session("T1", ana(), true).unwrap();
    store.clear_session();

    assert!(!store.is_authenticated());
    assert_eq!(storage.get(USER_KEY), Ok(None));
    assert_eq!(SessionStore::hydrate(storage).session(), &Session::default());
}

#[test]
fn clear_session_is_idempotent() {
    let mut store = SessionStore::hydrate(MemoryStorage::shared());
    store.clear_session();
    store.clear_session();
    assert_eq!(store.session(), &Session::default());
}

// =============================================================
// Malformed / partial storage
// =============================================================

#[test]
fn hydrate_with_empty_storage_is_empty() {
    let store = SessionStore::hydrate(MemoryStorage::shared());
    assert!(store.is_hydrated());
    assert!(!store.is_authenticated());
}

#[test]
fn hydrate_with_malformed_user_is_empty() {
    let storage = MemoryStorage::shared();
    storage.set(TOKEN_KEY, "T1").unwrap();
    storage.set(USER_KEY, "{not json").unwrap();
    let store = SessionStore::hydrate(storage);
    assert_eq!(store.session(), &Session::default());
}

#[test]
fn hydrate_with_token_but_null_user_keeps_token() {
    let storage = MemoryStorage::shared();
    storage.set(TOKEN_KEY, "T1").unwrap();
    storage.set(USER_KEY, "null").unwrap();
    let store = SessionStore::hydrate(storage);
    assert_eq!(store.token(), Some("T1"));
    assert!(store.user().is_none());
}

#[test]
fn hydrate_keeps_profile_with_structured_name() {
    let storage = MemoryStorage::shared();
    storage.set(TOKEN_KEY, "T1").unwrap();
    storage.set(USER_KEY, r#"{"name":{"first":"Ana"},"id":7}"#).unwrap();
    let store = SessionStore::hydrate(storage);
    assert_eq!(store.token(), Some("T1"));
    let user = store.user().unwrap();
    assert_eq!(user.extra.get("name"), Some(&json!({ "first": "Ana" })));
}

#[test]
fn hydrate_ignores_empty_token() {
    let storage = MemoryStorage::shared();
    storage.set(TOKEN_KEY, "").unwrap();
    storage.set(USER_KEY, r#"{"name":"Ana"}"#).unwrap();
    assert!(!SessionStore::hydrate(storage).is_authenticated());
}

// =============================================================
// set_session contract
// =============================================================

#[test]
fn set_session_rejects_empty_token() {
    let mut store = SessionStore::hydrate(MemoryStorage::shared());
    store.set_session("T1", ana(), false).unwrap();
    assert_eq!(store.set_session("", ana(), true), Err(SessionError::EmptyToken));
    assert_eq!(store.token(), Some("T1"));
}

#[test]
fn set_session_with_failing_storage_still_authenticates() {
    let mut store = SessionStore::hydrate(Arc::new(ReadOnlyStorage));
    store.set_session("T1", ana(), true).unwrap();
    assert_eq!(store.token(), Some("T1"));
    assert!(!store.session().persisted);
}

#[test]
fn login_scenario_with_keep_logged_in_writes_token() {
    let storage = MemoryStorage::shared();
    let mut store = SessionStore::hydrate(storage.clone());
    let user: UserProfile = serde_json::from_value(json!({ "name": "Ana" })).unwrap();
    store.set_session("T1", user, true).unwrap();
    assert_eq!(storage.get(TOKEN_KEY), Ok(Some("T1".to_owned())));
    assert_eq!(storage.get(USER_KEY), Ok(Some(r#"{"name":"Ana"}"#.to_owned())));
}

// =============================================================
// Token sources and redirect guard
// =============================================================

#[test]
fn token_source_reads_current_token() {
    let mut store = SessionStore::hydrate(MemoryStorage::shared());
    assert_eq!(TokenSource::token(&store), None);
    store.set_session("T1", ana(), false).unwrap();
    assert_eq!(TokenSource::token(&store), Some("T1".to_owned()));
}

#[test]
fn shared_token_source_sees_updates() {
    let shared = Arc::new(RwLock::new(SessionStore::hydrate(MemoryStorage::shared())));
    assert_eq!(shared.token(), None);
    shared.write().unwrap().set_session("T2", ana(), false).unwrap();
    assert_eq!(shared.token(), Some("T2".to_owned()));
}

#[test]
fn redirect_waits_for_hydration() {
    let store = SessionStore::empty(MemoryStorage::shared());
    assert!(!should_redirect_unauth(&store));
}

#[test]
fn redirect_when_hydrated_without_token() {
    let store = SessionStore::hydrate(MemoryStorage::shared());
    assert!(should_redirect_unauth(&store));
}

#[test]
fn no_redirect_when_authenticated() {
    let mut store = SessionStore::hydrate(MemoryStorage::shared());
    store.set_session("T1", ana(), false).unwrap();
    assert!(!should_redirect_unauth(&store));
}
