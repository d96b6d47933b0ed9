//! Preference option kinds.
//!
//! Every preference the store manages is modelled as its own type:
//!
//! | Kind                 | Domain                                   | Default      |
//! |----------------------|------------------------------------------|--------------|
//! | `PreferredBookmark`  | optional bookmark identifier             | absent       |
//! | `AmountOfResults`    | 10 / 20 / 30 / 40 / 50                   | 10           |
//! | `TemperatureUnit`    | celsius / fahrenheit / kelvin            | celsius      |
//! | `DistanceSpeedUnit`  | kilometres / miles                       | kilometres   |
//! | `SortingOrientation` | name / temperature / distance            | name         |
//!
//! The enumerated kinds share the [`PreferenceOption`] contract: they can be
//! built from a concrete value (always succeeds) or from a raw integer
//! discriminant (succeeds only for a declared member).  Raw discriminants are
//! 0-based in declaration order and are what the persisted document stores.
//!
//! There is no implicit fallback inside [`PreferenceOption::from_raw`]: an
//! out-of-range discriminant yields `None` and the caller picks the default.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a bookmarked weather station, owned by the bookmark list.
pub type BookmarkId = i64;

/// Label shown when no preferred bookmark is set or it no longer resolves.
pub const NONE_LABEL: &str = "None";

// ── Option kinds and their side effects ───────────────────────────────────────

/// Identifies one of the fixed option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    PreferredBookmark,
    AmountOfResults,
    TemperatureUnit,
    DistanceSpeedUnit,
    SortingOrientation,
}

/// A collaborator notification triggered when an option changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideEffect {
    /// The app-icon badge shows the preferred bookmark's temperature.
    BadgeRefresh,
    /// The nearby result set must be refetched.
    DataRefresh,
    /// UI observers re-sort their lists.
    PreferenceChangedBroadcast,
}

impl OptionKind {
    /// All option kinds, in snapshot field order.
    pub const ALL: [OptionKind; 5] = [
        OptionKind::PreferredBookmark,
        OptionKind::AmountOfResults,
        OptionKind::TemperatureUnit,
        OptionKind::DistanceSpeedUnit,
        OptionKind::SortingOrientation,
    ];

    /// Side effects the store must fire after committing a change of this kind.
    pub fn side_effects(self) -> &'static [SideEffect] {
        match self {
            OptionKind::PreferredBookmark | OptionKind::TemperatureUnit => {
                &[SideEffect::BadgeRefresh]
            }
            OptionKind::AmountOfResults => &[SideEffect::DataRefresh],
            OptionKind::DistanceSpeedUnit => &[],
            OptionKind::SortingOrientation => &[SideEffect::PreferenceChangedBroadcast],
        }
    }

    /// The stable key used for this kind in the persisted document.
    pub fn key(self) -> &'static str {
        match self {
            OptionKind::PreferredBookmark => "preferredBookmark",
            OptionKind::AmountOfResults => "amountOfResults",
            OptionKind::TemperatureUnit => "temperatureUnit",
            OptionKind::DistanceSpeedUnit => "windspeedUnit",
            OptionKind::SortingOrientation => "sortingOrientation",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a raw integer does not name a member of an option's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{raw} is not a valid discriminant for {kind}")]
pub struct InvalidDiscriminant {
    pub kind: OptionKind,
    pub raw: i64,
}

// ── Shared contract ───────────────────────────────────────────────────────────

/// Contract shared by all enumerated option kinds.
///
/// `Display` yields the human-readable label; it is a pure function of the
/// value.
pub trait PreferenceOption: Copy + Eq + fmt::Debug + fmt::Display + 'static {
    /// The kind this type represents.
    const KIND: OptionKind;

    /// Every member of the domain in discriminant order.
    const ALL: &'static [Self];

    /// The 0-based discriminant of this member.
    fn raw_value(self) -> u8;

    /// Builds an option from a raw discriminant.
    ///
    /// Returns `None` when `raw` does not name a declared member.
    fn from_raw(raw: i64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|option| i64::from(option.raw_value()) == raw)
    }
}

/// Generates the `u8` conversions serde uses to store an option as its
/// discriminant.
macro_rules! impl_raw_conversions {
    ($option:ty) => {
        impl TryFrom<u8> for $option {
            type Error = InvalidDiscriminant;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                <$option as PreferenceOption>::from_raw(i64::from(value)).ok_or(
                    InvalidDiscriminant {
                        kind: <$option as PreferenceOption>::KIND,
                        raw: i64::from(value),
                    },
                )
            }
        }

        impl From<$option> for u8 {
            fn from(option: $option) -> u8 {
                option.raw_value()
            }
        }
    };
}

// ── PreferredBookmark ─────────────────────────────────────────────────────────

/// Resolves a bookmark identifier to the station's display name.
///
/// Implemented by whoever owns the bookmark list.
pub trait BookmarkLookup: Send + Sync {
    /// Returns the name of the bookmarked station, or `None` if it is unknown.
    fn resolve_bookmark_name(&self, id: BookmarkId) -> Option<String>;
}

/// Reference into the external bookmark list; drives the app-icon badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferredBookmark(Option<BookmarkId>);

impl PreferredBookmark {
    pub const KIND: OptionKind = OptionKind::PreferredBookmark;

    pub fn new(value: Option<BookmarkId>) -> Self {
        Self(value)
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn value(self) -> Option<BookmarkId> {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Bookmarks are identifiers, not an enumerated domain, so there is no
    /// raw discriminant to build one from.
    pub fn from_raw(_raw: i64) -> Option<Self> {
        None
    }

    /// Name of the referenced station, or [`NONE_LABEL`] when unset or unknown.
    pub fn display_string(self, lookup: &dyn BookmarkLookup) -> String {
        self.0
            .and_then(|id| lookup.resolve_bookmark_name(id))
            .unwrap_or_else(|| NONE_LABEL.to_string())
    }
}

// ── AmountOfResults ───────────────────────────────────────────────────────────

/// How many nearby stations a data refresh fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum AmountOfResults {
    #[default]
    Ten = 0,
    Twenty = 1,
    Thirty = 2,
    Forty = 3,
    Fifty = 4,
}

impl AmountOfResults {
    /// The literal result count.
    pub fn integer_value(self) -> u32 {
        match self {
            AmountOfResults::Ten => 10,
            AmountOfResults::Twenty => 20,
            AmountOfResults::Thirty => 30,
            AmountOfResults::Forty => 40,
            AmountOfResults::Fifty => 50,
        }
    }
}

impl PreferenceOption for AmountOfResults {
    const KIND: OptionKind = OptionKind::AmountOfResults;
    const ALL: &'static [Self] = &[
        AmountOfResults::Ten,
        AmountOfResults::Twenty,
        AmountOfResults::Thirty,
        AmountOfResults::Forty,
        AmountOfResults::Fifty,
    ];

    fn raw_value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for AmountOfResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} results", self.integer_value())
    }
}

impl_raw_conversions!(AmountOfResults);

// ── TemperatureUnit ───────────────────────────────────────────────────────────

/// Unit used to display temperatures and the badge value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum TemperatureUnit {
    #[default]
    Celsius = 0,
    Fahrenheit = 1,
    Kelvin = 2,
}

impl TemperatureUnit {
    /// Short unit symbol appended to formatted temperatures.
    pub fn abbreviation(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
        }
    }
}

impl PreferenceOption for TemperatureUnit {
    const KIND: OptionKind = OptionKind::TemperatureUnit;
    const ALL: &'static [Self] = &[
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    fn raw_value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
            TemperatureUnit::Kelvin => "Kelvin",
        })
    }
}

impl_raw_conversions!(TemperatureUnit);

// ── DistanceSpeedUnit ─────────────────────────────────────────────────────────

/// Unit system for distances and wind speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum DistanceSpeedUnit {
    #[default]
    Kilometres = 0,
    Miles = 1,
}

impl DistanceSpeedUnit {
    pub fn distance_abbreviation(self) -> &'static str {
        match self {
            DistanceSpeedUnit::Kilometres => "km",
            DistanceSpeedUnit::Miles => "mi",
        }
    }

    pub fn speed_abbreviation(self) -> &'static str {
        match self {
            DistanceSpeedUnit::Kilometres => "km/h",
            DistanceSpeedUnit::Miles => "mph",
        }
    }
}

impl PreferenceOption for DistanceSpeedUnit {
    const KIND: OptionKind = OptionKind::DistanceSpeedUnit;
    const ALL: &'static [Self] = &[DistanceSpeedUnit::Kilometres, DistanceSpeedUnit::Miles];

    fn raw_value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DistanceSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DistanceSpeedUnit::Kilometres => "Metric",
            DistanceSpeedUnit::Miles => "Imperial",
        })
    }
}

impl_raw_conversions!(DistanceSpeedUnit);

// ── SortingOrientation ────────────────────────────────────────────────────────

/// Sort order of the nearby station list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum SortingOrientation {
    #[default]
    Name = 0,
    Temperature = 1,
    Distance = 2,
}

impl SortingOrientation {
    /// `true` if this orientation is only valid while location permission is granted.
    pub fn requires_location_permission(self) -> bool {
        matches!(self, SortingOrientation::Distance)
    }
}

impl PreferenceOption for SortingOrientation {
    const KIND: OptionKind = OptionKind::SortingOrientation;
    const ALL: &'static [Self] = &[
        SortingOrientation::Name,
        SortingOrientation::Temperature,
        SortingOrientation::Distance,
    ];

    fn raw_value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for SortingOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortingOrientation::Name => "Sort by name",
            SortingOrientation::Temperature => "Sort by temperature",
            SortingOrientation::Distance => "Sort by distance",
        })
    }
}

impl_raw_conversions!(SortingOrientation);

// ── Tests ─────────────────────────────────────────────────────────────────────
