//! Idempotent startup seeding.
//!
//! A fresh store gets a system reporter account and a deterministic batch
//! of sample reports so the map and feed are populated on first run. Both
//! steps are guarded: an already-seeded store passes through untouched.

use alert_map_database::{Store, StoreError};
use alert_map_geo::Coordinate;
use alert_map_sighting_models::{Report, ReportMedia, ReporterRef, SightingType};
use alert_map_user_models::{NotificationSettings, User};
use chrono::Utc;

/// Id of the system account that owns seeded reports.
pub const SEED_REPORTER_ID: &str = "community-reporter";

const DAY_MILLIS: i64 = 86_400_000;

/// Reports per day for the most recent week, newest day first.
const RECENT_RAMP: [usize; 7] = [14, 12, 10, 8, 6, 4, 2];

/// Additional reports spread over days 8 through 30.
const OLDER_COUNT: usize = 60;

/// Inline placeholder attached as evidence to seeded reports.
const PLACEHOLDER_PHOTO: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' \
     width='64' height='64'%3E%3Crect width='64' height='64' fill='%23475569'/%3E%3Ccircle \
     cx='32' cy='26' r='10' fill='%23cbd5e1'/%3E%3Cpath d='M32 40 L22 56 L42 56 Z' \
     fill='%23cbd5e1'/%3E%3C/svg%3E";

struct SeedCity {
    city: &'static str,
    state: &'static str,
    county: &'static str,
    latitude: f64,
    longitude: f64,
}

const SEED_CITIES: &[SeedCity] = &[
    SeedCity {
        city: "Los Angeles",
        state: "CA",
        county: "Los Angeles",
        latitude: 34.0522,
        longitude: -118.2437,
    },
    SeedCity {
        city: "Long Beach",
        state: "CA",
        county: "Los Angeles",
        latitude: 33.7701,
        longitude: -118.1937,
    },
    SeedCity {
        city: "Glendale",
        state: "CA",
        county: "Los Angeles",
        latitude: 34.1425,
        longitude: -118.2551,
    },
    SeedCity {
        city: "Santa Monica",
        state: "CA",
        county: "Los Angeles",
        latitude: 34.0195,
        longitude: -118.4912,
    },
    SeedCity {
        city: "Pasadena",
        state: "CA",
        county: "Los Angeles",
        latitude: 34.1478,
        longitude: -118.1445,
    },
    SeedCity {
        city: "San Diego",
        state: "CA",
        county: "San Diego",
        latitude: 32.7157,
        longitude: -117.1611,
    },
    SeedCity {
        city: "Chula Vista",
        state: "CA",
        county: "San Diego",
        latitude: 32.6401,
        longitude: -117.0842,
    },
    SeedCity {
        city: "Houston",
        state: "TX",
        county: "Harris",
        latitude: 29.7604,
        longitude: -95.3698,
    },
    SeedCity {
        city: "Dallas",
        state: "TX",
        county: "Dallas",
        latitude: 32.7767,
        longitude: -96.7970,
    },
    SeedCity {
        city: "Austin",
        state: "TX",
        county: "Travis",
        latitude: 30.2672,
        longitude: -97.7431,
    },
    SeedCity {
        city: "Phoenix",
        state: "AZ",
        county: "Maricopa",
        latitude: 33.4484,
        longitude: -112.0740,
    },
    SeedCity {
        city: "Baltimore",
        state: "MD",
        county: "Baltimore",
        latitude: 39.2904,
        longitude: -76.6122,
    },
    SeedCity {
        city: "Silver Spring",
        state: "MD",
        county: "Montgomery",
        latitude: 38.9907,
        longitude: -77.0261,
    },
    SeedCity {
        city: "Chicago",
        state: "IL",
        county: "Cook",
        latitude: 41.8781,
        longitude: -87.6298,
    },
    SeedCity {
        city: "Newark",
        state: "NJ",
        county: "Essex",
        latitude: 40.7357,
        longitude: -74.1724,
    },
];

/// Seeds the store on first run. Safe to call on every startup.
///
/// # Errors
///
/// Returns [`StoreError`] if either collection cannot be read or written.
pub fn run(store: &dyn Store) -> Result<(), StoreError> {
    let mut users = store.load_users()?;
    if !users.iter().any(|u| u.id == SEED_REPORTER_ID) {
        users.push(seed_reporter());
        store.save_users(&users)?;
        log::info!("Seeded system reporter account");
    }

    let reports = store.load_reports()?;
    if reports.is_empty() {
        let seeded = seed_reports(Utc::now().timestamp_millis());
        store.save_reports(&seeded)?;
        log::info!("Seeded {} sample report(s)", seeded.len());
    }

    Ok(())
}

/// System account that owns seeded reports. It never receives alerts.
fn seed_reporter() -> User {
    User {
        id: SEED_REPORTER_ID.to_string(),
        username: "Community Alert".to_string(),
        email: "community@alert.system".to_string(),
        is_admin: false,
        state: Some("CA".to_string()),
        county: Some("Los Angeles".to_string()),
        notification_settings: NotificationSettings {
            radius: 0.0,
            popup: false,
            email: false,
            sms: false,
            phone_number: None,
            location: None,
        },
    }
}

/// Builds the deterministic seed batch: a week-long ramp of recent
/// reports plus a long tail over the past month, sorted newest first.
fn seed_reports(now_millis: i64) -> Vec<Report> {
    let mut reports = Vec::new();
    let mut n: u64 = 0;

    for (days_ago, count) in RECENT_RAMP.iter().enumerate() {
        for _ in 0..*count {
            reports.push(seed_report(n, now_millis, u32::try_from(days_ago).unwrap_or(0)));
            n += 1;
        }
    }
    for _ in 0..OLDER_COUNT {
        let days_ago = 8 + u32::try_from(mix(n ^ 0xDA75) % 23).unwrap_or(0);
        reports.push(seed_report(n, now_millis, days_ago));
        n += 1;
    }

    reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    reports
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn seed_report(n: u64, now_millis: i64, days_ago: u32) -> Report {
    let city = &SEED_CITIES[usize::try_from(mix(n) % SEED_CITIES.len() as u64).unwrap_or(0)];
    let types = SightingType::all();
    let sighting_type = types[usize::try_from(mix(n ^ 0x7ABE) % types.len() as u64).unwrap_or(0)];

    // Jitter within roughly a mile of the city center.
    let latitude = city.latitude + (unit(n ^ 0x1A7) - 0.5) * 0.02;
    let longitude = city.longitude + (unit(n ^ 0x10B6) - 0.5) * 0.02;

    let time_of_day = (unit(n ^ 0x71ED) * DAY_MILLIS as f64) as i64;
    let timestamp = now_millis - i64::from(days_ago) * DAY_MILLIS - time_of_day;

    Report {
        id: format!("seed-{n}"),
        reporter: ReporterRef {
            id: SEED_REPORTER_ID.to_string(),
            username: "Community Alert".to_string(),
        },
        timestamp,
        location: Coordinate::new(latitude, longitude),
        address: format!("{}, {}", city.city, city.state),
        description: description_for(sighting_type).to_string(),
        sighting_type,
        sighting_type_other_description: sighting_type
            .requires_other_description()
            .then(|| "Unmarked vehicles staged near a transit stop".to_string()),
        media: ReportMedia {
            photo_base64: PLACEHOLDER_PHOTO.to_string(),
            video_base64: None,
        },
        area: Some(format!("{}, {}", city.county, city.state)),
    }
}

const fn description_for(sighting_type: SightingType) -> &'static str {
    match sighting_type {
        SightingType::Checkpoint => "Vehicle checkpoint slowing traffic at the intersection.",
        SightingType::Detainment => "One person detained and placed in an unmarked vehicle.",
        SightingType::SightingMotion => "Two marked vehicles moving south on the main road.",
        SightingType::SightingStationary => "Marked vehicle parked outside the shopping center.",
        SightingType::WorkplaceRaid => "Officers entering the rear of a commercial building.",
        SightingType::Residential => "Officers knocking at an apartment complex entrance.",
        SightingType::Courthouse => "Increased presence at the courthouse side entrance.",
        SightingType::Other => "Unusual enforcement activity reported by several passersby.",
    }
}

// SplitMix64 finalizer. Keeps the seed batch deterministic without
// pulling in a randomness crate.
const fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Uniform value in `[0, 1)` derived from `seed`.
#[allow(clippy::cast_precision_loss)]
fn unit(seed: u64) -> f64 {
    (mix(seed) >> 11) as f64 / (1u64 << 53) as f64
}
