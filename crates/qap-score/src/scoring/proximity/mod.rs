//! Mock nearby-amenity survey and the location sub-score derived from it.
//!
//! No external data source is consulted: amenities are synthesized around a
//! center coordinate with an injectable PRNG so tests can fix the seed. The
//! scoring constants are demonstration values carried over from the original
//! calculator, kept in one place below.

use crate::scoring::location::reference::Coordinates;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// Kinds of amenities the survey synthesizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityKind {
    Hospital,
    School,
    Store,
    Restaurant,
    BusStop,
    Pharmacy,
    Park,
    Library,
}

impl AmenityKind {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Hospital,
            Self::School,
            Self::Store,
            Self::Restaurant,
            Self::BusStop,
            Self::Pharmacy,
            Self::Park,
            Self::Library,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hospital => "Hospital",
            Self::School => "School",
            Self::Store => "Store",
            Self::Restaurant => "Restaurant",
            Self::BusStop => "Bus Stop",
            Self::Pharmacy => "Pharmacy",
            Self::Park => "Park",
            Self::Library => "Library",
        }
    }
}

/// A synthesized amenity. Regenerated and discarded on every survey; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Amenity {
    pub id: String,
    pub kind: AmenityKind,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub distance_km: f64,
}

/// Default cap on synthesized amenities per survey.
pub const DEFAULT_MAX_AMENITIES: usize = 50;

/// Minimum fraction of the radius an amenity is placed at; distances are
/// biased toward the edge of the circle.
const MIN_DISTANCE_FRACTION: f64 = 0.2;

const KM_PER_DEGREE_LATITUDE: f64 = 111.0;

/// Synthesize amenities around `center` within `radius_km`. The count grows
/// logarithmically with the radius: `floor(max_count * ln(r + 1) / ln(11))`,
/// so a 10 km survey saturates at `max_count`.
pub fn generate_amenities<R: Rng>(
    center: Coordinates,
    radius_km: f64,
    max_count: usize,
    rng: &mut R,
) -> Vec<Amenity> {
    let scale = (radius_km + 1.0).ln() / 11.0_f64.ln();
    let count = (max_count as f64 * scale).floor() as usize;

    let kinds = AmenityKind::ordered();
    let mut amenities = Vec::with_capacity(count);

    for i in 0..count {
        let angle = rng.gen::<f64>() * std::f64::consts::TAU;
        let distance =
            (MIN_DISTANCE_FRACTION + rng.gen::<f64>() * (1.0 - MIN_DISTANCE_FRACTION)) * radius_km;

        // Flat-earth approximation: 1 degree of latitude is ~111 km, and a
        // degree of longitude shrinks with cos(latitude).
        let lat_offset = distance * angle.cos() / KM_PER_DEGREE_LATITUDE;
        let lon_offset = distance * angle.sin()
            / (KM_PER_DEGREE_LATITUDE * center.lat.to_radians().cos());

        let kind = kinds[rng.gen_range(0..kinds.len())];

        amenities.push(Amenity {
            id: format!("amenity-{i}"),
            kind,
            name: format!("{} {}", kind.label(), i + 1),
            lat: center.lat + lat_offset,
            lon: center.lon + lon_offset,
            distance_km: distance,
        });
    }

    amenities
}

/// Count amenities per kind, in a stable kind order.
pub fn count_by_kind(amenities: &[Amenity]) -> BTreeMap<AmenityKind, usize> {
    let mut counts = BTreeMap::new();
    for amenity in amenities {
        *counts.entry(amenity.kind).or_insert(0) += 1;
    }
    counts
}

/// Raw and normalized location sub-score for an amenity survey.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationScore {
    pub raw: f64,
    pub normalized: u16,
}

// Demonstration scoring weights (placeholder values, no cited source).
const VARIETY_POINTS_PER_KIND: f64 = 1.5;
const VARIETY_CAP: f64 = 5.0;
const QUANTITY_LOG_WEIGHT: f64 = 3.0;
const QUANTITY_CAP: f64 = 10.0;
const RAW_SCALE_DENOMINATOR: f64 = 17.0;

/// Reduce a survey to the location category's score: variety and quantity
/// terms plus small bonuses for essential services, normalized onto the
/// state's maximum for the category.
pub fn location_score(amenities: &[Amenity], max_points: u16) -> LocationScore {
    let counts = count_by_kind(amenities);

    let mut raw = (counts.len() as f64 * VARIETY_POINTS_PER_KIND).min(VARIETY_CAP);
    raw += ((amenities.len() as f64 + 1.0).ln() * QUANTITY_LOG_WEIGHT).min(QUANTITY_CAP);

    if counts.contains_key(&AmenityKind::Hospital) {
        raw += 1.0;
    }
    if counts.contains_key(&AmenityKind::School) {
        raw += 0.5;
    }
    if counts.contains_key(&AmenityKind::Store) {
        raw += 0.5;
    }

    let scaled = (raw * f64::from(max_points) / RAW_SCALE_DENOMINATOR).round() as u16;
    LocationScore {
        raw,
        normalized: scaled.min(max_points),
    }
}
