#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Sighting report types and the sighting type taxonomy.
//!
//! This crate defines the canonical report record shared across the whole
//! alert-map system. Reports are immutable once admitted: the only
//! mutation the application ever performs is an admin hard delete by id.

use alert_map_geo::Coordinate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Kind of sighting being reported.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SightingType {
    /// Fixed checkpoint stopping traffic or pedestrians
    Checkpoint,
    /// A person being detained or taken into custody
    Detainment,
    /// Officers or vehicles observed in motion
    SightingMotion,
    /// Officers or vehicles observed stationary
    SightingStationary,
    /// Enforcement action at a workplace
    WorkplaceRaid,
    /// Enforcement action at a residence
    Residential,
    /// Activity at or around a courthouse
    Courthouse,
    /// Anything not covered above (requires a free-text description)
    Other,
}

impl SightingType {
    /// Whether this type requires the free-text sub-description on a draft.
    #[must_use]
    pub const fn requires_other_description(self) -> bool {
        matches!(self, Self::Other)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Checkpoint,
            Self::Detainment,
            Self::SightingMotion,
            Self::SightingStationary,
            Self::WorkplaceRaid,
            Self::Residential,
            Self::Courthouse,
            Self::Other,
        ]
    }
}

/// Denormalized snapshot of the user who filed a report.
///
/// This is display data captured at admission time, never a live
/// reference: the referenced user may since have been deleted, and
/// nothing may be resolved through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporterRef {
    /// Id of the reporting user at the time of submission.
    pub id: String,
    /// Display name of the reporting user at the time of submission.
    pub username: String,
}

/// Evidence attached to a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMedia {
    /// Base64 data URL of the photo (or video thumbnail).
    pub photo_base64: String,
    /// Base64 data URL of the video, when one was attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_base64: Option<String>,
}

impl ReportMedia {
    /// Whether any evidence is actually present.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.photo_base64.trim().is_empty()
            || self
                .video_base64
                .as_deref()
                .is_some_and(|v| !v.trim().is_empty())
    }
}

/// A community sighting report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique report id.
    pub id: String,
    /// Snapshot of the reporting user.
    pub reporter: ReporterRef,
    /// Submission time as Unix milliseconds.
    pub timestamp: i64,
    /// Where the sighting happened.
    pub location: Coordinate,
    /// Resolved street address of the sighting.
    pub address: String,
    /// Free-text description of what was observed.
    pub description: String,
    /// Taxonomy classification.
    pub sighting_type: SightingType,
    /// Free-text classification when `sighting_type` is `other`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sighting_type_other_description: Option<String>,
    /// Attached evidence.
    #[serde(flatten)]
    pub media: ReportMedia,
    /// Coarse `"County, State"` partition used by the feed, distinct from
    /// the precise coordinates used for radius matching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

impl Report {
    /// Whether this record carries usable coordinates.
    ///
    /// Every consumer treats this as a precondition for inclusion in any
    /// view or in subscriber matching; rows failing it are dropped at the
    /// storage boundary.
    #[must_use]
    pub fn has_valid_location(&self) -> bool {
        self.location.is_valid()
    }
}
