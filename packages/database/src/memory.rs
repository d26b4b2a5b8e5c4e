//! In-memory [`Store`] for tests and ephemeral runs.

use std::sync::RwLock;

use alert_map_sighting_models::Report;
use alert_map_user_models::User;

use crate::{Store, StoreError, filter_report_rows};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    current_user: Option<User>,
    reports: Vec<Report>,
}

/// Store that keeps every collection in process memory.
///
/// Saved reports still pass through the same read-side filter as the
/// file-backed store, so behavior matches [`crate::JsonStore`] apart from
/// durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Collections> {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Collections> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read().users.clone())
    }

    fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.write().users = users.to_vec();
        Ok(())
    }

    fn load_current_user(&self) -> Result<Option<User>, StoreError> {
        Ok(self.read().current_user.clone())
    }

    fn save_current_user(&self, user: Option<&User>) -> Result<(), StoreError> {
        self.write().current_user = user.cloned();
        Ok(())
    }

    fn load_reports(&self) -> Result<Vec<Report>, StoreError> {
        let rows = self
            .read()
            .reports
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(filter_report_rows(rows))
    }

    fn save_reports(&self, reports: &[Report]) -> Result<(), StoreError> {
        self.write().reports = reports.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_map_geo::Coordinate;
    use alert_map_sighting_models::{ReportMedia, ReporterRef, SightingType};

    fn report(id: &str) -> Report {
        Report {
            id: id.to_string(),
            reporter: ReporterRef {
                id: "u1".to_string(),
                username: "reporter".to_string(),
            },
            timestamp: 1_700_000_000_000,
            location: Coordinate::new(34.05, -118.24),
            address: "5th and Main".to_string(),
            description: "x".to_string(),
            sighting_type: SightingType::Checkpoint,
            sighting_type_other_description: None,
            media: ReportMedia {
                photo_base64: String::new(),
                video_base64: None,
            },
            area: None,
        }
    }

    #[test]
    fn reports_keep_storage_order() {
        let store = MemoryStore::new();
        store
            .save_reports(&[report("newest"), report("older"), report("oldest")])
            .unwrap();
        let ids: Vec<String> = store
            .load_reports()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["newest", "older", "oldest"]);
    }

    #[test]
    fn invalid_coordinates_are_filtered_even_in_memory() {
        let store = MemoryStore::new();
        let mut bad = report("bad");
        bad.location = Coordinate::new(f64::NAN, -118.24);
        store.save_reports(&[report("good"), bad]).unwrap();

        let reports = store.load_reports().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, "good");
    }
}
