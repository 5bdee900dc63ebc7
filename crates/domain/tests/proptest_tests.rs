//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{DomainError, ForecastKind, GeoLocation, ProviderId};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            let is_invalid = matches!(result, Err(DomainError::InvalidCoordinates { .. }));
            prop_assert!(is_invalid);
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn display_never_shows_sign(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new(lat, lon).unwrap();
            let shown = loc.to_string();
            prop_assert!(!shown.contains('-'));
            prop_assert!(shown.contains('N') || shown.contains('S'));
            prop_assert!(shown.contains('E') || shown.contains('W'));
        }

        #[test]
        fn serde_roundtrip_preserves_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new(lat, lon).unwrap();
            let json = serde_json::to_string(&loc).unwrap();
            let parsed: GeoLocation = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(loc, parsed);
        }
    }
}

// ============================================================================
// ForecastKind / ProviderId Property Tests
// ============================================================================

mod identifier_tests {
    use super::*;

    proptest! {
        #[test]
        fn forecast_kind_parse_ignores_case(upper in proptest::bool::ANY, hourly in proptest::bool::ANY) {
            let expected = if hourly { ForecastKind::Hourly } else { ForecastKind::Daily };
            let text = if upper {
                expected.as_str().to_uppercase()
            } else {
                expected.as_str().to_string()
            };
            prop_assert_eq!(text.parse::<ForecastKind>(), Ok(expected));
        }

        #[test]
        fn unknown_provider_names_rejected(name in "[a-z]{3,12}") {
            prop_assume!(!["nws", "metoffice"].contains(&name.as_str()));
            let is_unknown = matches!(
                name.parse::<ProviderId>(),
                Err(DomainError::UnknownProvider(_))
            );
            prop_assert!(is_unknown);
        }

        #[test]
        fn provider_config_key_parses_back(index in 0usize..ProviderId::ALL.len()) {
            let provider = ProviderId::ALL[index];
            prop_assert_eq!(provider.config_key().parse::<ProviderId>(), Ok(provider));
        }
    }
}
