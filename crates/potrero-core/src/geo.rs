//! Geographic validation for the governed region.
//!
//! The deployment governs ranches in the state of Tabasco, Mexico. Both
//! checks are pure, total functions over process-wide immutable constants:
//! callers interpret `false` as a validation error to report upward.

/// Inclusive bounding box of the governed region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Bounding box for Tabasco.
pub const REGION_BOUNDS: RegionBounds = RegionBounds {
    north: 18.7,
    south: 17.3,
    east: -91.0,
    west: -94.5,
};

/// Name of the governed state. Ranch records must carry exactly this value.
pub const REGION_STATE_NAME: &str = "Tabasco";

/// The 17 municipalities of the governed region.
///
/// Matching is case-sensitive and exact.
pub const MUNICIPALITIES: [&str; 17] = [
    "Balancán",
    "Cárdenas",
    "Centla",
    "Centro",
    "Comalcalco",
    "Cunduacán",
    "Emiliano Zapata",
    "Huimanguillo",
    "Jalapa",
    "Jalpa de Méndez",
    "Jonuta",
    "Macuspana",
    "Nacajuca",
    "Paraíso",
    "Tacotalpa",
    "Teapa",
    "Tenosique",
];

/// Check whether a coordinate pair lies within the governed region.
///
/// Boundary values are inside: a ranch sitting exactly on the border is
/// accepted.
#[must_use]
pub fn is_within_region(lat: f64, lng: f64) -> bool {
    lat >= REGION_BOUNDS.south
        && lat <= REGION_BOUNDS.north
        && lng >= REGION_BOUNDS.west
        && lng <= REGION_BOUNDS.east
}

/// Check whether a municipality name is on the governed whitelist.
#[must_use]
pub fn is_valid_municipality(name: &str) -> bool {
    MUNICIPALITIES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_interior_point() {
        // Villahermosa area
        assert!(is_within_region(17.9, -92.9));
    }

    #[test]
    fn test_rejects_north_of_bound() {
        assert!(!is_within_region(19.0, -92.9));
    }

    #[test]
    fn test_rejects_out_of_range_longitude() {
        assert!(!is_within_region(17.9, -90.0));
        assert!(!is_within_region(17.9, -95.0));
    }

    #[test]
    fn test_boundary_values_are_inside() {
        assert!(is_within_region(REGION_BOUNDS.north, -92.9));
        assert!(is_within_region(REGION_BOUNDS.south, -92.9));
        assert!(is_within_region(17.9, REGION_BOUNDS.east));
        assert!(is_within_region(17.9, REGION_BOUNDS.west));
        // All four corners
        assert!(is_within_region(REGION_BOUNDS.north, REGION_BOUNDS.east));
        assert!(is_within_region(REGION_BOUNDS.south, REGION_BOUNDS.west));
    }

    #[test]
    fn test_municipality_whitelist() {
        assert!(is_valid_municipality("Centro"));
        assert!(is_valid_municipality("Emiliano Zapata"));
        assert!(is_valid_municipality("Jalpa de Méndez"));
        assert!(!is_valid_municipality("Villahermosa"));
        assert!(!is_valid_municipality(""));
    }

    #[test]
    fn test_municipality_match_is_case_sensitive() {
        assert!(!is_valid_municipality("centro"));
        assert!(!is_valid_municipality("CENTRO"));
    }

    #[test]
    fn test_whitelist_has_seventeen_entries() {
        assert_eq!(MUNICIPALITIES.len(), 17);
    }

    proptest::proptest! {
        #[test]
        fn membership_matches_bounding_box(
            lat in -90.0f64..90.0,
            lng in -180.0f64..180.0,
        ) {
            let expected = (REGION_BOUNDS.south..=REGION_BOUNDS.north).contains(&lat)
                && (REGION_BOUNDS.west..=REGION_BOUNDS.east).contains(&lng);
            proptest::prop_assert_eq!(is_within_region(lat, lng), expected);
        }
    }
}
