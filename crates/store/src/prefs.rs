//! JSON-file preference store.
//!
//! Every mutation is written through to disk immediately (temp file +
//! rename), so a crash never leaves a half-written file behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::session::Session;

/// Well-known preference keys.
pub mod keys {
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const USER_ID: &str = "user_id";
    pub const USER_NAME: &str = "user_name";
    pub const USER_EMAIL: &str = "user_email";
    pub const USER_PHOTO: &str = "user_photo";
    pub const USER_LOCATION: &str = "user_location";
    pub const IS_LOGGED_IN: &str = "is_logged_in";
    pub const IS_ONBOARDING_COMPLETED: &str = "is_onboarding_completed";
    pub const PLANT_RECOMMENDATION: &str = "plant_recommendation";

    /// Keys removed on logout.
    pub const USER_DATA: [&str; 6] = [
        AUTH_TOKEN,
        USER_ID,
        USER_NAME,
        USER_EMAIL,
        USER_PHOTO,
        USER_LOCATION,
    ];
}

/// Key-value store persisted as a flat JSON object.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl PreferenceStore {
    /// Open the store at `path`. A missing or empty file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };

        tracing::debug!(path = %path.display(), entries = values.len(), "Opened preference store");

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ---- generic accessors ----

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.values.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn set_string(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        self.flush()
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> StoreResult<()> {
        self.values.insert(key.to_string(), Value::Bool(value));
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    // ---- session & profile ----

    pub fn auth_token(&self) -> Option<&str> {
        self.get_string(keys::AUTH_TOKEN)
    }

    pub fn save_auth_token(&mut self, token: &str) -> StoreResult<()> {
        self.set_string(keys::AUTH_TOKEN, token)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.get_string(keys::USER_ID)
    }

    pub fn save_user_id(&mut self, id: &str) -> StoreResult<()> {
        self.set_string(keys::USER_ID, id)
    }

    pub fn user_name(&self) -> Option<&str> {
        self.get_string(keys::USER_NAME)
    }

    pub fn save_user_name(&mut self, name: &str) -> StoreResult<()> {
        self.set_string(keys::USER_NAME, name)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.get_string(keys::USER_EMAIL)
    }

    pub fn save_user_email(&mut self, email: &str) -> StoreResult<()> {
        self.set_string(keys::USER_EMAIL, email)
    }

    pub fn user_photo(&self) -> Option<&str> {
        self.get_string(keys::USER_PHOTO)
    }

    pub fn save_user_photo(&mut self, url: &str) -> StoreResult<()> {
        self.set_string(keys::USER_PHOTO, url)
    }

    pub fn user_location(&self) -> Option<&str> {
        self.get_string(keys::USER_LOCATION)
    }

    pub fn save_user_location(&mut self, location: &str) -> StoreResult<()> {
        self.set_string(keys::USER_LOCATION, location)
    }

    pub fn is_logged_in(&self) -> bool {
        self.get_bool(keys::IS_LOGGED_IN)
    }

    pub fn set_logged_in(&mut self, logged_in: bool) -> StoreResult<()> {
        self.set_bool(keys::IS_LOGGED_IN, logged_in)
    }

    pub fn is_onboarding_completed(&self) -> bool {
        self.get_bool(keys::IS_ONBOARDING_COMPLETED)
    }

    pub fn set_onboarding_completed(&mut self, completed: bool) -> StoreResult<()> {
        self.set_bool(keys::IS_ONBOARDING_COMPLETED, completed)
    }

    // ---- onboarding ----

    /// Last plant recommendation, stored as the raw JSON text.
    pub fn plant_recommendation(&self) -> Option<&str> {
        self.get_string(keys::PLANT_RECOMMENDATION)
    }

    pub fn save_plant_recommendation(&mut self, json: &str) -> StoreResult<()> {
        self.set_string(keys::PLANT_RECOMMENDATION, json)
    }

    // ---- bulk operations ----

    /// Forget the logged-in user. Onboarding state and the stored
    /// recommendation survive.
    pub fn clear_user_data(&mut self) -> StoreResult<()> {
        for key in keys::USER_DATA {
            self.values.remove(key);
        }
        self.values
            .insert(keys::IS_LOGGED_IN.to_string(), Value::Bool(false));
        tracing::info!(path = %self.path.display(), "Cleared user data");
        self.flush()
    }

    pub fn clear_all(&mut self) -> StoreResult<()> {
        self.values.clear();
        tracing::info!(path = %self.path.display(), "Cleared all preferences");
        self.flush()
    }

    /// Snapshot of the current login.
    pub fn session(&self) -> Session {
        Session {
            token: self.auth_token().map(str::to_string),
            user_id: self.user_id().map(str::to_string),
            name: self.user_name().map(str::to_string),
            email: self.user_email().map(str::to_string),
            photo: self.user_photo().map(str::to_string),
            location: self.user_location().map(str::to_string),
            logged_in: self.is_logged_in(),
            onboarding_completed: self.is_onboarding_completed(),
        }
    }

    // ---- private helpers ----

    fn flush(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.values).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        atomic_write(&self.path, json.as_bytes())
    }
}

/// Write via a sibling temp file and rename over the target.
fn atomic_write(path: &Path, content: &[u8]) -> StoreResult<()> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_err)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "prefs".to_string());
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content).map_err(io_err)?;
    fs::rename(&temp_path, path).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("prefs.json")).unwrap();
        assert!(store.auth_token().is_none());
        assert!(!store.is_logged_in());
        assert!(!store.is_onboarding_completed());
    }

    #[test]
    fn empty_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "").unwrap();
        let store = PreferenceStore::open(&path).unwrap();
        assert!(store.user_name().is_none());
    }

    #[test]
    fn wrong_type_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"auth_token": 42, "is_logged_in": "yes"}"#).unwrap();
        let store = PreferenceStore::open(&path).unwrap();
        assert!(store.auth_token().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn remove_missing_key_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = PreferenceStore::open(&path).unwrap();
        store.remove(keys::USER_PHOTO).unwrap();
        assert!(!path.exists());
    }
}
