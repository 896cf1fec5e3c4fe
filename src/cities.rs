//! Preset observer locations.

/// A named observer location, coordinates in degrees (east-positive longitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Cities offered by the city picker.
#[rustfmt::skip]
pub const CITIES: &[Location] = &[
    Location { name: "Seoul", latitude: 37.5665, longitude: 126.9780 },
    Location { name: "Busan", latitude: 35.1796, longitude: 129.0756 },
    Location { name: "Jeju", latitude: 33.4996, longitude: 126.5312 },
    Location { name: "Tokyo", latitude: 35.6762, longitude: 139.6503 },
    Location { name: "Osaka", latitude: 34.6937, longitude: 135.5023 },
    Location { name: "Fukuoka", latitude: 33.5902, longitude: 130.4017 },
    Location { name: "Sapporo", latitude: 43.0618, longitude: 141.3545 },
];

/// Look up a preset city by name, ignoring case.
pub fn find_city(name: &str) -> Option<&'static Location> {
    CITIES.iter().find(|c| c.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let seoul = find_city("  seoul ").unwrap();
        assert_eq!(seoul.latitude, 37.5665);
        assert_eq!(find_city("SAPPORO").unwrap().name, "Sapporo");
        assert!(find_city("Atlantis").is_none());
    }

    #[test]
    fn presets_are_valid_locations() {
        for city in CITIES {
            assert!((-90.0..=90.0).contains(&city.latitude), "{city:?}");
            assert!((-180.0..=180.0).contains(&city.longitude), "{city:?}");
        }
    }
}
