//! Regional adjustment of emissions
//!
//! A coarse latitude-derived multiplier approximating heating and grid
//! differences between regions. Longitude is accepted but does not take part
//! in the adjustment.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Geographic position supplied by the caller (e.g. from browser geolocation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Factor applied when no location is known
pub const DEFAULT_LOCATION_FACTOR: f64 = 1.0;

/// One entry of the ordered latitude dispatch table
#[derive(Debug, Clone, Copy)]
pub struct LocationBand {
    pub region: &'static str,
    pub applies: fn(f64) -> bool,
    pub factor: f64,
}

/// Latitude bands, evaluated top to bottom; the first match wins.
///
/// The bands overlap on a naive reading (50° is both "> 45" and "> 30"),
/// so the order is part of the contract.
pub const LOCATION_FACTOR_BANDS: &[LocationBand] = &[
    LocationBand {
        region: "Nordic",
        applies: |lat| lat > 60.0,
        factor: 1.3,
    },
    LocationBand {
        region: "Northern Europe / Northern US / Canada",
        applies: |lat| lat > 45.0,
        factor: 1.1,
    },
    LocationBand {
        region: "Southern hemisphere developed",
        applies: |lat| lat < -30.0,
        factor: 1.2,
    },
    LocationBand {
        region: "Mediterranean / Southern US",
        applies: |lat| lat > 30.0 && lat < 45.0,
        factor: 0.9,
    },
];

/// Resolve the band matching a latitude, if any
pub fn location_band(latitude: f64) -> Option<&'static LocationBand> {
    LOCATION_FACTOR_BANDS
        .iter()
        .find(|band| (band.applies)(latitude))
}

/// Regional emission multiplier for an optional location
pub fn compute_location_factor(location: Option<&Location>) -> f64 {
    location
        .and_then(|loc| location_band(loc.latitude))
        .map(|band| band.factor)
        .unwrap_or(DEFAULT_LOCATION_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(65.0, 1.3)]
    #[case(50.0, 1.1)]
    #[case(35.0, 0.9)]
    #[case(-40.0, 1.2)]
    #[case(10.0, 1.0)]
    #[case(-30.0, 1.0)]
    #[case(30.0, 1.0)]
    #[case(45.0, 1.0)]
    #[case(60.0, 1.1)]
    #[case(90.0, 1.3)]
    #[case(-90.0, 1.2)]
    fn test_location_factor_bands(#[case] latitude: f64, #[case] expected: f64) {
        let loc = Location::new(latitude, 0.0);
        assert_eq!(compute_location_factor(Some(&loc)), expected);
    }

    #[test]
    fn test_no_location_is_neutral() {
        assert_eq!(compute_location_factor(None), 1.0);
    }

    #[test]
    fn test_first_match_wins() {
        // 50 satisfies "> 30" too, but the "> 45" band comes first
        let band = location_band(50.0).unwrap();
        assert_eq!(band.factor, 1.1);
        assert!(location_band(0.0).is_none());
    }

    #[test]
    fn test_location_validation() {
        assert!(Location::new(45.0, 10.0).validate().is_ok());
        assert!(Location::new(91.0, 10.0).validate().is_err());
        assert!(Location::new(0.0, -181.0).validate().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: longitude never changes the factor
        #[test]
        fn prop_longitude_ignored(lat in -90.0f64..=90.0, lng1 in -180.0f64..=180.0, lng2 in -180.0f64..=180.0) {
            let a = compute_location_factor(Some(&Location::new(lat, lng1)));
            let b = compute_location_factor(Some(&Location::new(lat, lng2)));
            prop_assert_eq!(a, b);
        }

        /// Property: factor is always one of the known values
        #[test]
        fn prop_factor_in_known_set(lat in -90.0f64..=90.0) {
            let f = compute_location_factor(Some(&Location::new(lat, 0.0)));
            prop_assert!([1.3, 1.1, 1.2, 0.9, 1.0].contains(&f));
        }
    }
}
