#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Coordinate type and great-circle distance math.
//!
//! Distances are in statute miles because every user-facing radius and
//! message in the application is expressed in miles.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A WGS84 point: latitude/longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in decimal degrees, valid range [-90, 90].
    pub latitude: f64,
    /// Longitude in decimal degrees, valid range [-180, 180].
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate without validating its range.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and within WGS84 range.
    ///
    /// Consumers treat this as a precondition: records failing it are
    /// filtered out at the storage boundary and never reach distance math.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle distance between two points in statute miles (haversine).
///
/// Symmetric, zero for coincident points, and finite for any valid input.
/// The square-root argument is clamped to [0, 1] so floating-point error
/// near coincident or antipodal points cannot produce a NaN. Non-finite
/// inputs yield NaN; callers are expected to validate coordinates first
/// (see [`Coordinate::is_valid`]).
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}
