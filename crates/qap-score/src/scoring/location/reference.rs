//! Static reference tables: supported states, their cities and zip codes,
//! and demonstration coordinates for each city. Lookups for unknown keys
//! resolve to empty results rather than errors.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug)]
pub struct CityEntry {
    pub name: &'static str,
    pub zip_codes: &'static [&'static str],
    pub coordinates: Coordinates,
}

#[derive(Debug)]
pub struct StateEntry {
    pub name: &'static str,
    pub cities: &'static [CityEntry],
}

const fn city(
    name: &'static str,
    zip_codes: &'static [&'static str],
    lat: f64,
    lon: f64,
) -> CityEntry {
    CityEntry {
        name,
        zip_codes,
        coordinates: Coordinates { lat, lon },
    }
}

static STATES: &[StateEntry] = &[
    StateEntry {
        name: "Texas",
        cities: &[
            city(
                "Austin",
                &["78701", "78702", "78703", "78704", "78705"],
                30.2672,
                -97.7431,
            ),
            city(
                "Dallas",
                &["75201", "75202", "75203", "75204", "75205"],
                32.7767,
                -96.7970,
            ),
            city(
                "Houston",
                &["77001", "77002", "77003", "77004", "77005"],
                29.7604,
                -95.3698,
            ),
            city(
                "San Antonio",
                &["78201", "78202", "78203", "78204", "78205"],
                29.4241,
                -98.4936,
            ),
            city(
                "Fort Worth",
                &["76101", "76102", "76103", "76104", "76105"],
                32.7555,
                -97.3308,
            ),
        ],
    },
    StateEntry {
        name: "California",
        cities: &[
            city(
                "Los Angeles",
                &["90001", "90002", "90003", "90004", "90005"],
                34.0522,
                -118.2437,
            ),
            city(
                "San Francisco",
                &["94102", "94103", "94104", "94105", "94107"],
                37.7749,
                -122.4194,
            ),
            city(
                "San Diego",
                &["92101", "92102", "92103", "92104", "92105"],
                32.7157,
                -117.1611,
            ),
            city(
                "Sacramento",
                &["95811", "95814", "95816", "95818", "95820"],
                38.5816,
                -121.4944,
            ),
            city(
                "San Jose",
                &["95110", "95111", "95112", "95113", "95116"],
                37.3382,
                -121.8863,
            ),
        ],
    },
];

fn find_state(state: &str) -> Option<&'static StateEntry> {
    STATES.iter().find(|entry| entry.name == state)
}

fn find_city(state: &str, city: &str) -> Option<&'static CityEntry> {
    find_state(state)?.cities.iter().find(|entry| entry.name == city)
}

/// Names of all supported states, in source order.
pub fn state_options() -> Vec<&'static str> {
    STATES.iter().map(|entry| entry.name).collect()
}

/// Cities of a state in source order; empty for unknown states.
pub fn city_options(state: &str) -> Vec<&'static str> {
    find_state(state)
        .map(|entry| entry.cities.iter().map(|c| c.name).collect())
        .unwrap_or_default()
}

/// Zip codes for a state/city pair in source order; empty when either key is
/// unknown.
pub fn zip_code_options(state: &str, city: &str) -> Vec<&'static str> {
    find_city(state, city)
        .map(|entry| entry.zip_codes.to_vec())
        .unwrap_or_default()
}

/// Demonstration center coordinate for a city, if known.
pub fn city_coordinates(state: &str, city: &str) -> Option<Coordinates> {
    find_city(state, city).map(|entry| entry.coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_states_in_source_order() {
        assert_eq!(state_options(), vec!["Texas", "California"]);
    }

    #[test]
    fn lists_texas_cities_in_source_order() {
        assert_eq!(
            city_options("Texas"),
            vec!["Austin", "Dallas", "Houston", "San Antonio", "Fort Worth"]
        );
    }

    #[test]
    fn austin_zip_codes_match_table() {
        assert_eq!(
            zip_code_options("Texas", "Austin"),
            vec!["78701", "78702", "78703", "78704", "78705"]
        );
    }

    #[test]
    fn unknown_keys_yield_empty_results() {
        assert!(city_options("Iowa").is_empty());
        assert!(zip_code_options("Texas", "El Paso").is_empty());
        assert!(zip_code_options("Iowa", "Des Moines").is_empty());
        assert!(city_coordinates("Texas", "El Paso").is_none());
    }

    #[test]
    fn every_city_has_five_zip_codes_and_a_coordinate() {
        for state in state_options() {
            for city in city_options(state) {
                assert_eq!(zip_code_options(state, city).len(), 5);
                let coords = city_coordinates(state, city).expect("coordinate present");
                assert!(coords.lat > 24.0 && coords.lat < 42.0);
                assert!(coords.lon < -95.0 && coords.lon > -123.0);
            }
        }
    }
}
