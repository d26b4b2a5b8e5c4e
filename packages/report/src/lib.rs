#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Report submission validation and admission.
//!
//! [`admit`] is the single entry point through which a draft becomes a
//! [`Report`]: it applies the admission rules, then stamps the id, the
//! submission timestamp, and the immutable reporter snapshot. No partial
//! report is ever produced — a draft either passes every rule or the
//! caller gets back the first structured [`ValidationError`].

use alert_map_geo::Coordinate;
use alert_map_sighting_models::{Report, ReportMedia, ReporterRef, SightingType};
use alert_map_user_models::User;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-correctable reason a draft was rejected.
///
/// These are returned as values, never thrown: the UI renders the reason
/// next to the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// No photo or video was attached.
    #[error("a photo or video is required")]
    MissingMedia,

    /// The address field is empty or whitespace.
    #[error("an address is required")]
    MissingAddress,

    /// The description field is empty or whitespace.
    #[error("a description is required")]
    MissingDescription,

    /// Sighting type is `other` but the free-text sub-description is empty.
    #[error("a description of the sighting type is required")]
    MissingOtherDescription,

    /// The required consent checkbox was not set.
    #[error("consent confirmation is required")]
    ConsentRequired,
}

impl ValidationError {
    /// Stable machine-readable code for API responses.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingMedia => "missing_media",
            Self::MissingAddress => "missing_address",
            Self::MissingDescription => "missing_description",
            Self::MissingOtherDescription => "missing_other_description",
            Self::ConsentRequired => "consent_required",
        }
    }
}

/// An unvalidated report submission.
///
/// Location and address arrive pre-resolved: geolocation and geocoding
/// happen in external collaborators before the core is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    /// Where the sighting happened (already resolved).
    pub location: Coordinate,
    /// Street address of the sighting (already resolved).
    pub address: String,
    /// Free-text description of what was observed.
    pub description: String,
    /// Taxonomy classification.
    pub sighting_type: SightingType,
    /// Free-text classification when `sighting_type` is `other`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sighting_type_other_description: Option<String>,
    /// Base64 data URL of the photo (or video thumbnail).
    #[serde(default)]
    pub photo_base64: String,
    /// Base64 data URL of the video, when one was attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_base64: Option<String>,
    /// Coarse `"County, State"` partition for the feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// The submitter confirmed they are a human filing in good faith.
    #[serde(default)]
    pub consent_confirmed: bool,
}

/// Checks the admission rules without consuming the draft.
///
/// # Errors
///
/// Returns the first failing [`ValidationError`], checked in the same
/// order the submission form surfaces them: media, address, sub-
/// description, description, consent.
pub fn validate(draft: &ReportDraft) -> Result<(), ValidationError> {
    let media = ReportMedia {
        photo_base64: draft.photo_base64.clone(),
        video_base64: draft.video_base64.clone(),
    };
    if !media.is_present() {
        return Err(ValidationError::MissingMedia);
    }
    if draft.address.trim().is_empty() {
        return Err(ValidationError::MissingAddress);
    }
    if draft.sighting_type.requires_other_description()
        && draft
            .sighting_type_other_description
            .as_deref()
            .is_none_or(|d| d.trim().is_empty())
    {
        return Err(ValidationError::MissingOtherDescription);
    }
    if draft.description.trim().is_empty() {
        return Err(ValidationError::MissingDescription);
    }
    if !draft.consent_confirmed {
        return Err(ValidationError::ConsentRequired);
    }
    Ok(())
}

/// Validates a draft and, on success, stamps it into an immutable
/// [`Report`] attributed to `reporter`.
///
/// The returned report is not yet stored; the caller appends it to the
/// front of the report collection so newest-first iteration holds.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any admission rule fails.
pub fn admit(draft: ReportDraft, reporter: &User) -> Result<Report, ValidationError> {
    validate(&draft)?;

    Ok(Report {
        id: Uuid::new_v4().to_string(),
        reporter: ReporterRef {
            id: reporter.id.clone(),
            username: reporter.username.clone(),
        },
        timestamp: Utc::now().timestamp_millis(),
        location: draft.location,
        address: draft.address,
        description: draft.description,
        sighting_type: draft.sighting_type,
        sighting_type_other_description: if draft.sighting_type.requires_other_description() {
            draft.sighting_type_other_description
        } else {
            None
        },
        media: ReportMedia {
            photo_base64: draft.photo_base64,
            video_base64: draft.video_base64,
        },
        area: draft.area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_map_user_models::NotificationSettings;

    fn reporter() -> User {
        User {
            id: "reporter-1".to_string(),
            username: "reporter".to_string(),
            email: "reporter@example.com".to_string(),
            is_admin: false,
            state: Some("CA".to_string()),
            county: Some("Los Angeles".to_string()),
            notification_settings: NotificationSettings::default(),
        }
    }

    fn valid_draft() -> ReportDraft {
        ReportDraft {
            location: Coordinate::new(34.0522, -118.2437),
            address: "123 Main St, Los Angeles, CA".to_string(),
            description: "Two marked vehicles parked outside".to_string(),
            sighting_type: SightingType::SightingStationary,
            sighting_type_other_description: None,
            photo_base64: "data:image/png;base64,AAAA".to_string(),
            video_base64: None,
            area: Some("Los Angeles, CA".to_string()),
            consent_confirmed: true,
        }
    }

    #[test]
    fn valid_draft_is_admitted_with_stamps() {
        let report = admit(valid_draft(), &reporter()).unwrap();
        assert!(!report.id.is_empty());
        assert!(report.timestamp > 0);
        assert_eq!(report.reporter.id, "reporter-1");
        assert_eq!(report.reporter.username, "reporter");
        assert_eq!(report.area.as_deref(), Some("Los Angeles, CA"));
        assert!(report.has_valid_location());
    }

    #[test]
    fn missing_media_is_rejected() {
        let draft = ReportDraft {
            photo_base64: String::new(),
            video_base64: None,
            ..valid_draft()
        };
        assert_eq!(
            admit(draft, &reporter()).unwrap_err(),
            ValidationError::MissingMedia
        );
    }

    #[test]
    fn whitespace_address_is_rejected() {
        let draft = ReportDraft {
            address: "   ".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            admit(draft, &reporter()).unwrap_err(),
            ValidationError::MissingAddress
        );
    }

    #[test]
    fn whitespace_description_is_rejected() {
        let draft = ReportDraft {
            description: "\t".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            admit(draft, &reporter()).unwrap_err(),
            ValidationError::MissingDescription
        );
    }

    #[test]
    fn other_type_requires_sub_description() {
        let draft = ReportDraft {
            sighting_type: SightingType::Other,
            sighting_type_other_description: Some("  ".to_string()),
            ..valid_draft()
        };
        assert_eq!(
            admit(draft, &reporter()).unwrap_err(),
            ValidationError::MissingOtherDescription
        );

        let draft = ReportDraft {
            sighting_type: SightingType::Other,
            sighting_type_other_description: Some("unmarked van surveillance".to_string()),
            ..valid_draft()
        };
        let report = admit(draft, &reporter()).unwrap();
        assert_eq!(
            report.sighting_type_other_description.as_deref(),
            Some("unmarked van surveillance")
        );
    }

    #[test]
    fn sub_description_is_dropped_for_non_other_types() {
        let draft = ReportDraft {
            sighting_type_other_description: Some("stale text".to_string()),
            ..valid_draft()
        };
        let report = admit(draft, &reporter()).unwrap();
        assert_eq!(report.sighting_type_other_description, None);
    }

    #[test]
    fn consent_is_required() {
        let draft = ReportDraft {
            consent_confirmed: false,
            ..valid_draft()
        };
        assert_eq!(
            admit(draft, &reporter()).unwrap_err(),
            ValidationError::ConsentRequired
        );
    }

    #[test]
    fn admitted_ids_are_unique() {
        let a = admit(valid_draft(), &reporter()).unwrap();
        let b = admit(valid_draft(), &reporter()).unwrap();
        assert_ne!(a.id, b.id);
    }
}
