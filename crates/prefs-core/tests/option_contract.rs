//! Integration tests for the option contract and the snapshot codec.
//!
//! These tests go through the public API only and check the properties every
//! option kind must share:
//!
//! - Raw construction accepts exactly the declared domain.
//! - Every member of every kind survives an encode/decode of a snapshot.
//! - A snapshot with one bad enumerant is rejected as a whole.

use prefs_core::{
    decode_snapshot, encode_snapshot, AmountOfResults, DistanceSpeedUnit, OptionKind,
    PreferenceOption, PreferencesSnapshot, PreferredBookmark, SortingOrientation,
    TemperatureUnit,
};

/// Asserts that `T` accepts `0..ALL.len()` and rejects everything around it.
fn assert_raw_domain<T: PreferenceOption>() {
    let size = T::ALL.len() as i64;
    for raw in 0..size {
        let option = T::from_raw(raw).expect("declared discriminant must construct");
        assert_eq!(i64::from(option.raw_value()), raw);
    }
    for raw in [-1, size, 99] {
        assert!(
            T::from_raw(raw).is_none(),
            "{} must reject raw value {raw}",
            T::KIND
        );
    }
}

#[test]
fn test_every_enumerated_kind_rejects_out_of_range_discriminants() {
    assert_raw_domain::<AmountOfResults>();
    assert_raw_domain::<TemperatureUnit>();
    assert_raw_domain::<DistanceSpeedUnit>();
    assert_raw_domain::<SortingOrientation>();
}

#[test]
fn test_domain_sizes_match_declared_members() {
    assert_eq!(AmountOfResults::ALL.len(), 5);
    assert_eq!(TemperatureUnit::ALL.len(), 3);
    assert_eq!(DistanceSpeedUnit::ALL.len(), 2);
    assert_eq!(SortingOrientation::ALL.len(), 3);
}

#[test]
fn test_every_member_survives_the_codec() {
    let mut snapshots = Vec::new();
    for &amount in AmountOfResults::ALL {
        snapshots.push(PreferencesSnapshot {
            amount_of_results: amount,
            ..PreferencesSnapshot::default()
        });
    }
    for &unit in TemperatureUnit::ALL {
        snapshots.push(PreferencesSnapshot {
            temperature_unit: unit,
            ..PreferencesSnapshot::default()
        });
    }
    for &unit in DistanceSpeedUnit::ALL {
        snapshots.push(PreferencesSnapshot {
            distance_speed_unit: unit,
            ..PreferencesSnapshot::default()
        });
    }
    for &orientation in SortingOrientation::ALL {
        snapshots.push(PreferencesSnapshot {
            sorting_orientation: orientation,
            ..PreferencesSnapshot::default()
        });
    }
    for bookmark in [None, Some(0), Some(5341145), Some(-3)] {
        snapshots.push(PreferencesSnapshot {
            preferred_bookmark: PreferredBookmark::new(bookmark),
            ..PreferencesSnapshot::default()
        });
    }

    for original in snapshots {
        let text = encode_snapshot(&original).expect("encode");
        let restored = decode_snapshot(&text).expect("decode");
        assert_eq!(restored, original, "document was:\n{text}");
    }
}

#[test]
fn test_each_key_rejects_a_bad_enumerant() {
    for kind in OptionKind::ALL {
        if kind == OptionKind::PreferredBookmark {
            continue;
        }
        let text = format!("{} = 42", kind.key());
        assert!(
            decode_snapshot(&text).is_err(),
            "{kind} = 42 must not decode"
        );
    }
}
