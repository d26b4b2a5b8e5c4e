#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Wholesale key-value persistence for the user and report collections.
//!
//! Three top-level collections — users, the current session user, and
//! reports — are each read and written as a whole: no partial updates, no
//! transactions, no query language. The [`Store`] trait is the injected
//! repository seam; the matcher and validator stay pure and take the
//! loaded collections as parameters.
//!
//! The report collection is kept newest-first in storage order, so
//! "most recent first" iteration is simply slice order.

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use alert_map_sighting_models::Report;
use alert_map_user_models::User;

/// Errors that can occur while loading or saving a collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// File read/write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A collection payload could not be parsed or encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Repository over the three persisted collections.
///
/// Implementations must uphold the read-side invariant on reports: rows
/// that fail to deserialize or carry invalid coordinates are dropped at
/// load time — never repaired, never a hard error. The store may contain
/// legacy-invalid rows and every consumer treats coordinate validity as a
/// precondition.
pub trait Store {
    /// Loads the full users collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read or parsed.
    fn load_users(&self) -> Result<Vec<User>, StoreError>;

    /// Replaces the full users collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be written.
    fn save_users(&self, users: &[User]) -> Result<(), StoreError>;

    /// Loads the current session user, if one is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be read or parsed.
    fn load_current_user(&self) -> Result<Option<User>, StoreError>;

    /// Replaces (or clears) the current session user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be written.
    fn save_current_user(&self, user: Option<&User>) -> Result<(), StoreError>;

    /// Loads the report collection, newest first, with malformed rows
    /// filtered out.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read or its
    /// top-level structure is not an array.
    fn load_reports(&self) -> Result<Vec<Report>, StoreError>;

    /// Replaces the full report collection. Callers keep it newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be written.
    fn save_reports(&self, reports: &[Report]) -> Result<(), StoreError>;
}

/// Applies the read-side invariant to raw report rows.
///
/// Each row is deserialized independently; rows that fail to parse or
/// carry non-finite/out-of-range coordinates are dropped with a single
/// summary warning. Order of surviving rows is preserved.
fn filter_report_rows(rows: Vec<serde_json::Value>) -> Vec<Report> {
    let total = rows.len();
    let reports: Vec<Report> = rows
        .into_iter()
        .filter_map(|row| {
            serde_json::from_value::<Report>(row)
                .ok()
                .filter(Report::has_valid_location)
        })
        .collect();

    let dropped = total - reports.len();
    if dropped > 0 {
        log::warn!("Dropped {dropped} malformed report(s) while loading the report collection");
    }

    reports
}
