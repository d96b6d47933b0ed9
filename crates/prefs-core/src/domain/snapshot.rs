//! The settings snapshot: exactly one value per option kind.
//!
//! A snapshot is what gets persisted and restored, always as a whole.  Field
//! names are serialised in camelCase so the document keys stay stable:
//!
//! ```toml
//! version = 1
//! preferredBookmark = 5341145
//! amountOfResults = 0
//! temperatureUnit = 1
//! windspeedUnit = 0
//! sortingOrientation = 2
//! ```
//!
//! # Serde default values
//!
//! The struct carries `#[serde(default)]`, so any key missing from a stored
//! document is filled from [`PreferencesSnapshot::default`].  This keeps older
//! documents loadable when a newer build adds an option kind.  Unknown keys are
//! ignored for the same reason.

use serde::{Deserialize, Serialize};

use super::option::{
    AmountOfResults, DistanceSpeedUnit, PreferredBookmark, SortingOrientation, TemperatureUnit,
};

/// Schema version written into every persisted document.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// The complete set of current option values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesSnapshot {
    /// Schema version of the document this snapshot was read from.
    pub version: u32,
    #[serde(skip_serializing_if = "PreferredBookmark::is_none")]
    pub preferred_bookmark: PreferredBookmark,
    pub amount_of_results: AmountOfResults,
    pub temperature_unit: TemperatureUnit,
    #[serde(rename = "windspeedUnit")]
    pub distance_speed_unit: DistanceSpeedUnit,
    pub sorting_orientation: SortingOrientation,
}

impl Default for PreferencesSnapshot {
    fn default() -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            preferred_bookmark: PreferredBookmark::none(),
            amount_of_results: AmountOfResults::Ten,
            temperature_unit: TemperatureUnit::Celsius,
            distance_speed_unit: DistanceSpeedUnit::Kilometres,
            sorting_orientation: SortingOrientation::Name,
        }
    }
}

impl PreferencesSnapshot {
    /// Returns `true` if every option holds its declared default.
    pub fn is_default(&self) -> bool {
        let defaults = Self::default();
        self.preferred_bookmark == defaults.preferred_bookmark
            && self.amount_of_results == defaults.amount_of_results
            && self.temperature_unit == defaults.temperature_unit
            && self.distance_speed_unit == defaults.distance_speed_unit
            && self.sorting_orientation == defaults.sorting_orientation
    }
}
