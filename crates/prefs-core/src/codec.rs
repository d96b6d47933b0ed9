//! TOML codec for the preferences document.
//!
//! [`encode_snapshot`] turns a [`PreferencesSnapshot`] into the text stored on
//! disk and [`decode_snapshot`] parses it back.  Neither function touches the
//! file system; reading and writing the file is the job of the storage layer.
//!
//! # Decoding rules
//!
//! - Missing keys are filled from the declared defaults.
//! - Unknown keys are ignored.
//! - An enumerant outside its domain (e.g. `temperatureUnit = 99`) fails the
//!   whole document.  There is no per-field repair: a snapshot is restored
//!   completely or not at all.
//! - A document written by a newer schema version is decoded by key name and
//!   a warning is logged.

use thiserror::Error;
use tracing::warn;

use crate::domain::snapshot::{PreferencesSnapshot, CURRENT_SCHEMA_VERSION};

/// Error type for snapshot encoding and decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The document is not valid TOML or does not match the snapshot schema.
    #[error("failed to decode preferences document: {0}")]
    Decode(#[from] toml::de::Error),

    /// The snapshot could not be rendered as TOML.
    #[error("failed to encode preferences document: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Serialises `snapshot` into a TOML document stamped with the current schema version.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialisation fails.
pub fn encode_snapshot(snapshot: &PreferencesSnapshot) -> Result<String, CodecError> {
    let document = PreferencesSnapshot {
        version: CURRENT_SCHEMA_VERSION,
        ..*snapshot
    };
    Ok(toml::to_string(&document)?)
}

/// Parses a TOML document into a snapshot.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the text is not TOML or any present key
/// holds a value outside its option's domain.
pub fn decode_snapshot(text: &str) -> Result<PreferencesSnapshot, CodecError> {
    let snapshot: PreferencesSnapshot = toml::from_str(text)?;
    if snapshot.version > CURRENT_SCHEMA_VERSION {
        warn!(
            stored = snapshot.version,
            supported = CURRENT_SCHEMA_VERSION,
            "preferences document was written by a newer schema version"
        );
    }
    Ok(snapshot)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::option::{
        AmountOfResults, DistanceSpeedUnit, PreferredBookmark, SortingOrientation,
        TemperatureUnit,
    };

    fn customised() -> PreferencesSnapshot {
        PreferencesSnapshot {
            version: CURRENT_SCHEMA_VERSION,
            preferred_bookmark: PreferredBookmark::new(Some(5341145)),
            amount_of_results: AmountOfResults::Forty,
            temperature_unit: TemperatureUnit::Fahrenheit,
            distance_speed_unit: DistanceSpeedUnit::Miles,
            sorting_orientation: SortingOrientation::Distance,
        }
    }

    // ── Encoding ──────────────────────────────────────────────────────────────

    #[test]
    fn test_encode_uses_stable_keys_and_integer_discriminants() {
        // Act
        let text = encode_snapshot(&customised()).expect("encode");

        // Assert
        assert!(text.contains("version = 1"), "got:\n{text}");
        assert!(text.contains("preferredBookmark = 5341145"), "got:\n{text}");
        assert!(text.contains("amountOfResults = 3"), "got:\n{text}");
        assert!(text.contains("temperatureUnit = 1"), "got:\n{text}");
        assert!(text.contains("windspeedUnit = 1"), "got:\n{text}");
        assert!(text.contains("sortingOrientation = 2"), "got:\n{text}");
    }

    #[test]
    fn test_encode_omits_absent_bookmark() {
        let text = encode_snapshot(&PreferencesSnapshot::default()).expect("encode");
        assert!(!text.contains("preferredBookmark"), "got:\n{text}");
    }

    #[test]
    fn test_encode_stamps_current_version() {
        let legacy = PreferencesSnapshot {
            version: 0,
            ..PreferencesSnapshot::default()
        };
        let text = encode_snapshot(&legacy).expect("encode");
        assert!(text.contains("version = 1"), "got:\n{text}");
    }

    #[test]
    fn test_encoded_document_decodes_to_same_values() {
        let original = customised();
        let text = encode_snapshot(&original).expect("encode");
        assert_eq!(decode_snapshot(&text).expect("decode"), original);
    }

    // ── Decoding ──────────────────────────────────────────────────────────────

    #[test]
    fn test_decode_out_of_range_discriminant_fails_whole_document() {
        let text = r#"
version = 1
amountOfResults = 1
temperatureUnit = 99
"#;
        let result = decode_snapshot(text);
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_discriminant_beyond_u8_fails() {
        let result = decode_snapshot("sortingOrientation = 300");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_missing_keys_are_default_filled() {
        // Arrange: a document written before the sort preference existed
        let text = r#"
temperatureUnit = 2
windspeedUnit = 1
"#;

        // Act
        let snapshot = decode_snapshot(text).expect("decode partial");

        // Assert
        assert_eq!(snapshot.temperature_unit, TemperatureUnit::Kelvin);
        assert_eq!(snapshot.distance_speed_unit, DistanceSpeedUnit::Miles);
        assert_eq!(snapshot.amount_of_results, AmountOfResults::Ten);
        assert_eq!(snapshot.sorting_orientation, SortingOrientation::Name);
        assert_eq!(snapshot.preferred_bookmark, PreferredBookmark::none());
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let text = r#"
amountOfResults = 4
showBadge = true
"#;
        let snapshot = decode_snapshot(text).expect("decode with unknown key");
        assert_eq!(snapshot.amount_of_results, AmountOfResults::Fifty);
    }

    #[test]
    fn test_decode_accepts_newer_schema_version() {
        let snapshot = decode_snapshot("version = 7\ntemperatureUnit = 1").expect("decode");
        assert_eq!(snapshot.version, 7);
        assert_eq!(snapshot.temperature_unit, TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn test_decode_malformed_toml_fails() {
        assert!(decode_snapshot("[[[ not valid toml").is_err());
    }

    #[test]
    fn test_decode_wrong_value_type_fails() {
        assert!(decode_snapshot("temperatureUnit = \"celsius\"").is_err());
    }
}
