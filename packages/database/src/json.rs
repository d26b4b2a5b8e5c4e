//! File-backed [`Store`]: one JSON document per collection.
//!
//! `users.json`, `current_user.json`, and `reports.json` live under a
//! single data directory, each written wholesale on every mutation.

use std::fs;
use std::path::{Path, PathBuf};

use alert_map_sighting_models::Report;
use alert_map_user_models::User;

use crate::{Store, StoreError, filter_report_rows};

const USERS_FILE: &str = "users.json";
const CURRENT_USER_FILE: &str = "current_user.json";
const REPORTS_FILE: &str = "reports.json";

/// JSON-file store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Opens (creating if needed) the data directory at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The data directory this store reads and writes.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_or<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
        missing: T,
    ) -> Result<T, StoreError> {
        let path = self.dir.join(file);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(missing),
            Err(e) => Err(e.into()),
        }
    }

    fn write<T: serde::Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let path = self.dir.join(file);
        let contents = serde_json::to_string(value)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Store for JsonStore {
    fn load_users(&self) -> Result<Vec<User>, StoreError> {
        self.read_or(USERS_FILE, Vec::new())
    }

    fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.write(USERS_FILE, &users)
    }

    fn load_current_user(&self) -> Result<Option<User>, StoreError> {
        self.read_or(CURRENT_USER_FILE, None)
    }

    fn save_current_user(&self, user: Option<&User>) -> Result<(), StoreError> {
        self.write(CURRENT_USER_FILE, &user)
    }

    fn load_reports(&self) -> Result<Vec<Report>, StoreError> {
        let rows: Vec<serde_json::Value> = self.read_or(REPORTS_FILE, Vec::new())?;
        Ok(filter_report_rows(rows))
    }

    fn save_reports(&self, reports: &[Report]) -> Result<(), StoreError> {
        self.write(REPORTS_FILE, &reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_map_user_models::NotificationSettings;

    fn temp_store(tag: &str) -> JsonStore {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("alert-map-{tag}-{}-{nanos}", std::process::id()));
        JsonStore::open(dir).unwrap()
    }

    #[test]
    fn missing_files_load_as_empty_collections() {
        let store = temp_store("empty");
        assert!(store.load_users().unwrap().is_empty());
        assert!(store.load_reports().unwrap().is_empty());
        assert!(store.load_current_user().unwrap().is_none());
    }

    #[test]
    fn users_round_trip() {
        let store = temp_store("users");
        let users = vec![User {
            id: "u1".to_string(),
            username: "test".to_string(),
            email: "test@example.com".to_string(),
            is_admin: false,
            state: None,
            county: None,
            notification_settings: NotificationSettings::default(),
        }];
        store.save_users(&users).unwrap();
        assert_eq!(store.load_users().unwrap(), users);

        store.save_current_user(Some(&users[0])).unwrap();
        assert_eq!(store.load_current_user().unwrap(), Some(users[0].clone()));
        store.save_current_user(None).unwrap();
        assert_eq!(store.load_current_user().unwrap(), None);
    }

    #[test]
    fn corrupt_report_rows_are_dropped_on_load() {
        let store = temp_store("corrupt");
        // Two legacy-invalid rows and one good one, as raw JSON: a
        // non-numeric latitude and a missing location.
        let raw = serde_json::json!([
            {
                "id": "good",
                "reporter": {"id": "u1", "username": "reporter"},
                "timestamp": 1_700_000_000_000_i64,
                "location": {"latitude": 34.05, "longitude": -118.24},
                "address": "5th and Main",
                "description": "ok",
                "sightingType": "checkpoint",
                "photoBase64": "data:image/png;base64,AAAA"
            },
            {
                "id": "bad-latitude",
                "reporter": {"id": "u1", "username": "reporter"},
                "timestamp": 1_700_000_000_000_i64,
                "location": {"latitude": "abc", "longitude": -118.24},
                "address": "x",
                "description": "x",
                "sightingType": "checkpoint",
                "photoBase64": ""
            },
            {
                "id": "no-location",
                "reporter": {"id": "u1", "username": "reporter"},
                "timestamp": 1_700_000_000_000_i64,
                "address": "x",
                "description": "x",
                "sightingType": "checkpoint",
                "photoBase64": ""
            }
        ]);
        std::fs::write(
            store.dir().join("reports.json"),
            serde_json::to_string(&raw).unwrap(),
        )
        .unwrap();

        let reports = store.load_reports().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, "good");
    }

    #[test]
    fn out_of_range_coordinates_are_dropped_on_load() {
        let store = temp_store("range");
        let raw = serde_json::json!([
            {
                "id": "latitude-out-of-range",
                "reporter": {"id": "u1", "username": "reporter"},
                "timestamp": 1_700_000_000_000_i64,
                "location": {"latitude": 134.05, "longitude": -118.24},
                "address": "x",
                "description": "x",
                "sightingType": "checkpoint",
                "photoBase64": ""
            }
        ]);
        std::fs::write(
            store.dir().join("reports.json"),
            serde_json::to_string(&raw).unwrap(),
        )
        .unwrap();

        assert!(store.load_reports().unwrap().is_empty());
    }
}
