#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the alert map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the domain types to allow independent evolution of the API
//! contract.

use alert_map_sighting_models::{Report, SightingType};
use alert_map_user_models::{NotificationSettings, User};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A sighting report as returned by the API.
///
/// Currently identical to the domain record; kept as a distinct type so
/// the wire contract can diverge without touching storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiReport(pub Report);

impl From<Report> for ApiReport {
    fn from(report: Report) -> Self {
        Self(report)
    }
}

/// Query parameters for the reports endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQueryParams {
    /// Restrict to one `"County, State"` feed partition.
    pub area: Option<String>,
    /// Maximum number of results (newest first).
    pub limit: Option<usize>,
}

/// Query parameters for the directory endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryQueryParams {
    /// Restrict to one state (case-insensitive).
    pub state: Option<String>,
}

/// Response to a successful report submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportResponse {
    /// The admitted report.
    pub report: ApiReport,
    /// How many subscribers were selected for notification.
    pub notified_subscribers: usize,
    /// How many delivery intents were handed to channel senders.
    pub delivery_intents: usize,
}

/// One entry in the sighting type taxonomy listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSightingType {
    /// Wire name (`snake_case`).
    pub id: SightingType,
    /// Whether a free-text sub-description is required on submission.
    pub requires_description: bool,
}

/// A user as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    /// Unique user id.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Whether this user may hard-delete reports.
    pub is_admin: bool,
    /// Two-letter state for coarse feed partitioning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// County name for coarse feed partitioning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    /// Proximity alert preferences.
    pub notification_settings: NotificationSettings,
}

impl From<User> for ApiUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            state: user.state,
            county: user.county,
            notification_settings: user.notification_settings,
        }
    }
}

/// Body for the registration endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    /// Display name.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Two-letter state for coarse feed partitioning.
    pub state: Option<String>,
    /// County name for coarse feed partitioning.
    pub county: Option<String>,
}

/// Body for the settings-save endpoint. Replaces the whole preference
/// struct atomically.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsBody {
    /// Two-letter state for coarse feed partitioning.
    pub state: Option<String>,
    /// County name for coarse feed partitioning.
    pub county: Option<String>,
    /// The replacement notification settings.
    pub notification_settings: NotificationSettings,
}
