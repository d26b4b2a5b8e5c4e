#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Proximity subscription matching and notification delivery intents.
//!
//! The pipeline for every admitted report is: [`match_subscribers`] picks
//! the users whose saved location is within their configured radius, then
//! [`build_delivery_intents`] expands each match into one intent per
//! enabled channel. Both functions are pure — they read the collections
//! they are handed and mutate nothing. Transport is behind the
//! [`ChannelSender`] seam.

use alert_map_geo::distance_miles;
use alert_map_sighting_models::Report;
use alert_map_user_models::User;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Delivery channel for a single notification.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryChannel {
    /// In-app popup.
    Popup,
    /// Email to the user's account address.
    Email,
    /// SMS to the user's configured phone number.
    Sms,
}

/// One notification to send via one channel, prior to actual transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
#[serde(rename_all_fields = "camelCase")]
pub enum DeliveryIntent {
    /// In-app popup notification.
    Popup {
        /// Recipient user id.
        user_id: String,
        /// Rendered notification text.
        message: String,
    },
    /// Email notification.
    Email {
        /// Recipient user id.
        user_id: String,
        /// Destination email address.
        address: String,
        /// Rendered notification text.
        message: String,
    },
    /// SMS notification.
    Sms {
        /// Recipient user id.
        user_id: String,
        /// Destination phone number.
        phone_number: String,
        /// Rendered notification text.
        message: String,
        /// Link back into the app, `{origin}/#report={id}`.
        deep_link: String,
    },
}

impl DeliveryIntent {
    /// The channel this intent targets.
    #[must_use]
    pub const fn channel(&self) -> DeliveryChannel {
        match self {
            Self::Popup { .. } => DeliveryChannel::Popup,
            Self::Email { .. } => DeliveryChannel::Email,
            Self::Sms { .. } => DeliveryChannel::Sms,
        }
    }

    /// The recipient user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::Popup { user_id, .. }
            | Self::Email { user_id, .. }
            | Self::Sms { user_id, .. } => user_id,
        }
    }
}

/// Selects the users who should be alerted about `report`.
///
/// The reporter is never matched against their own report. Users without
/// a saved location or with every channel disabled are skipped silently —
/// those are configuration states, not failures. A user matches when the
/// distance from their saved location to the report is within their
/// radius, boundary inclusive.
///
/// Order of the returned slice references is unspecified.
#[must_use]
pub fn match_subscribers<'a>(report: &Report, users: &'a [User]) -> Vec<&'a User> {
    users
        .iter()
        .filter(|user| user.id != report.reporter.id)
        .filter(|user| user.notification_settings.has_active_channel())
        .filter(|user| {
            user.notification_settings.location.as_ref().is_some_and(|loc| {
                distance_miles(loc.coordinate(), report.location)
                    <= user.notification_settings.radius
            })
        })
        .collect()
}

/// Expands matched users into concrete delivery intents for `report`.
///
/// Each matched user yields one intent per enabled channel. SMS
/// additionally requires a non-empty phone number; without one the SMS
/// intent is skipped while other channels still fire. `origin` is the
/// public base URL used for the SMS deep link.
#[must_use]
pub fn build_delivery_intents(
    report: &Report,
    matched: &[&User],
    origin: &str,
) -> Vec<DeliveryIntent> {
    let mut intents = Vec::new();

    for user in matched {
        let settings = &user.notification_settings;
        let Some(location) = settings.location.as_ref() else {
            continue;
        };

        let distance = distance_miles(location.coordinate(), report.location);
        let message = format!(
            "New report at {} is {distance:.1} miles away.",
            report.address
        );

        if settings.popup {
            intents.push(DeliveryIntent::Popup {
                user_id: user.id.clone(),
                message: message.clone(),
            });
        }
        if settings.email {
            intents.push(DeliveryIntent::Email {
                user_id: user.id.clone(),
                address: user.email.clone(),
                message: message.clone(),
            });
        }
        if settings.sms {
            if let Some(phone_number) = settings.sms_number() {
                intents.push(DeliveryIntent::Sms {
                    user_id: user.id.clone(),
                    phone_number: phone_number.to_string(),
                    message: message.clone(),
                    deep_link: format!("{origin}/#report={}", report.id),
                });
            }
        }
    }

    intents
}

/// Transport seam for delivery intents.
///
/// The core only decides what to send and to whom; implementations of
/// this trait own the actual email/SMS/push transport.
pub trait ChannelSender {
    /// Hands one intent to the underlying transport.
    fn send(&self, intent: &DeliveryIntent);
}

/// [`ChannelSender`] that writes each intent to the application log.
///
/// This is the default transport in development and in deployments with
/// no provider configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSender;

impl ChannelSender for LogSender {
    fn send(&self, intent: &DeliveryIntent) {
        match intent {
            DeliveryIntent::Popup { user_id, message } => {
                log::info!("[IN-APP POPUP] To {user_id}: {message}");
            }
            DeliveryIntent::Email {
                address, message, ..
            } => {
                log::info!("[EMAIL] To {address}: {message}");
            }
            DeliveryIntent::Sms {
                phone_number,
                message,
                deep_link,
                ..
            } => {
                log::info!("[SMS] To {phone_number}: {message} View: {deep_link}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_map_geo::Coordinate;
    use alert_map_sighting_models::{ReportMedia, ReporterRef, SightingType};
    use alert_map_user_models::{NotificationSettings, SavedLocation};

    const ORIGIN: &str = "https://alerts.example.com";

    fn report_at(latitude: f64, longitude: f64) -> Report {
        Report {
            id: "r1".to_string(),
            reporter: ReporterRef {
                id: "reporter-1".to_string(),
                username: "reporter".to_string(),
            },
            timestamp: 1_700_000_000_000,
            location: Coordinate::new(latitude, longitude),
            address: "5th and Main".to_string(),
            description: "vehicles observed".to_string(),
            sighting_type: SightingType::SightingStationary,
            sighting_type_other_description: None,
            media: ReportMedia {
                photo_base64: "data:image/png;base64,AAAA".to_string(),
                video_base64: None,
            },
            area: Some("Los Angeles, CA".to_string()),
        }
    }

    fn subscriber(id: &str, latitude: f64, longitude: f64, radius: f64) -> User {
        User {
            id: id.to_string(),
            username: id.to_string(),
            email: format!("{id}@example.com"),
            is_admin: false,
            state: None,
            county: None,
            notification_settings: NotificationSettings {
                radius,
                location: Some(SavedLocation {
                    latitude,
                    longitude,
                    address: "home".to_string(),
                }),
                ..NotificationSettings::default()
            },
        }
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let center = Coordinate::new(34.05, -118.24);
        let report = report_at(34.15, -118.24);
        let d = distance_miles(center, report.location);

        // Radius exactly equal to the distance matches (<=, not <).
        let exact = subscriber("u1", center.latitude, center.longitude, d);
        assert_eq!(match_subscribers(&report, std::slice::from_ref(&exact)).len(), 1);

        // The slightest shortfall does not.
        let under = subscriber("u2", center.latitude, center.longitude, d - 0.0001);
        assert!(match_subscribers(&report, std::slice::from_ref(&under)).is_empty());
    }

    #[test]
    fn reporter_never_matches_own_report() {
        let report = report_at(34.05, -118.24);
        // Same id as the report's reporter, sitting right on top of it.
        let own = subscriber("reporter-1", 34.05, -118.24, 30.0);
        assert!(match_subscribers(&report, &[own]).is_empty());
    }

    #[test]
    fn users_without_location_or_channels_are_skipped() {
        let report = report_at(34.05, -118.24);

        let mut no_location = subscriber("u1", 34.05, -118.24, 10.0);
        no_location.notification_settings.location = None;

        let mut no_channels = subscriber("u2", 34.05, -118.24, 10.0);
        no_channels.notification_settings.popup = false;
        no_channels.notification_settings.email = false;
        no_channels.notification_settings.sms = false;

        let users = vec![no_location, no_channels];
        assert!(match_subscribers(&report, &users).is_empty());
    }

    #[test]
    fn email_only_user_gets_exactly_one_email_intent() {
        let report = report_at(34.05, -118.24);
        let mut user = subscriber("u1", 34.05, -118.24, 10.0);
        user.notification_settings.popup = false;
        user.notification_settings.email = true;
        user.notification_settings.sms = false;

        let matched = vec![&user];
        let intents = build_delivery_intents(&report, &matched, ORIGIN);
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].channel(), DeliveryChannel::Email);
        match &intents[0] {
            DeliveryIntent::Email { address, .. } => assert_eq!(address, "u1@example.com"),
            other => panic!("unexpected intent {other:?}"),
        }
    }

    #[test]
    fn sms_without_phone_number_is_skipped_but_other_channels_fire() {
        let report = report_at(34.05, -118.24);
        let mut user = subscriber("u1", 34.05, -118.24, 10.0);
        user.notification_settings.sms = true;
        user.notification_settings.phone_number = Some(String::new());

        let matched = vec![&user];
        let intents = build_delivery_intents(&report, &matched, ORIGIN);
        // popup is on by default; the SMS intent must be silently dropped.
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].channel(), DeliveryChannel::Popup);
    }

    #[test]
    fn sms_intent_carries_deep_link() {
        let report = report_at(34.05, -118.24);
        let mut user = subscriber("u1", 34.05, -118.24, 10.0);
        user.notification_settings.sms = true;
        user.notification_settings.phone_number = Some("555-0100".to_string());

        let matched = vec![&user];
        let intents = build_delivery_intents(&report, &matched, ORIGIN);
        let sms = intents
            .iter()
            .find(|i| i.channel() == DeliveryChannel::Sms)
            .expect("sms intent");
        match sms {
            DeliveryIntent::Sms {
                phone_number,
                deep_link,
                ..
            } => {
                assert_eq!(phone_number, "555-0100");
                assert_eq!(deep_link, "https://alerts.example.com/#report=r1");
            }
            other => panic!("unexpected intent {other:?}"),
        }
    }

    #[test]
    fn end_to_end_popup_scenario() {
        // User U at 34.05,-118.24 with a 5 mile radius and popups on;
        // reporter R submits ~0.8 miles away.
        let user = subscriber("user-u", 34.05, -118.24, 5.0);
        let users = vec![user];
        let report = report_at(34.06, -118.2475);

        let matched = match_subscribers(&report, &users);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "user-u");

        let intents = build_delivery_intents(&report, &matched, ORIGIN);
        assert_eq!(
            intents,
            vec![DeliveryIntent::Popup {
                user_id: "user-u".to_string(),
                message: "New report at 5th and Main is 0.8 miles away.".to_string(),
            }]
        );

        // A quarter-hundredth of a degree further west crosses the
        // rounding boundary: 0.897 mi renders as 0.9, not 0.8.
        let report = report_at(34.06, -118.25);
        let intents = build_delivery_intents(&report, &match_subscribers(&report, &users), ORIGIN);
        match &intents[0] {
            DeliveryIntent::Popup { message, .. } => {
                assert_eq!(message, "New report at 5th and Main is 0.9 miles away.");
            }
            other => panic!("unexpected intent {other:?}"),
        }
    }

    #[test]
    fn intent_serializes_with_channel_tag() {
        let intent = DeliveryIntent::Popup {
            user_id: "u1".to_string(),
            message: "hi".to_string(),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["channel"], "popup");
        assert_eq!(json["userId"], "u1");
    }
}
