#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! User accounts and notification preference types.
//!
//! A user owns exactly one [`NotificationSettings`] value. Settings are
//! only ever replaced wholesale by the settings-save operation; there are
//! no partial-field updates.

use alert_map_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// A saved alert center point with its display address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLocation {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Human-readable address shown in the settings screen.
    pub address: String,
}

impl SavedLocation {
    /// The center point as a [`Coordinate`].
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Per-user proximity alert preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Alert radius around the saved location, in statute miles.
    pub radius: f64,
    /// Deliver in-app popup notifications.
    pub popup: bool,
    /// Deliver email notifications.
    pub email: bool,
    /// Deliver SMS notifications.
    pub sms: bool,
    /// Destination number for SMS. SMS delivery is skipped when this is
    /// absent or empty, even if the channel is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Center point for radius matching. Users without one cannot be
    /// matched against incoming reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SavedLocation>,
}

impl Default for NotificationSettings {
    /// Registration defaults: 10 mile radius, popups on, email/SMS off.
    fn default() -> Self {
        Self {
            radius: 10.0,
            popup: true,
            email: false,
            sms: false,
            phone_number: None,
            location: None,
        }
    }
}

impl NotificationSettings {
    /// Whether at least one delivery channel is enabled.
    #[must_use]
    pub const fn has_active_channel(&self) -> bool {
        self.popup || self.email || self.sms
    }

    /// Non-empty SMS destination number, if SMS delivery is possible.
    #[must_use]
    pub fn sms_number(&self) -> Option<&str> {
        self.phone_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user id. Identity itself is established by an external auth
    /// collaborator; this record carries no credentials.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Email address, used as the destination for the email channel.
    pub email: String,
    /// Whether this user may hard-delete reports.
    #[serde(default)]
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

impl User {
    /// The user's `"County, State"` feed partition, when both are set.
    #[must_use]
    pub fn area(&self) -> Option<String> {
        match (self.county.as_deref(), self.state.as_deref()) {
            (Some(county), Some(state)) => Some(format!("{county}, {state}")),
            _ => None,
        }
    }
}
