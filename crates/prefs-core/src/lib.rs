//! # prefs-core
//!
//! Shared library for the NearbyWeather preferences store containing the
//! typed preference options, the settings snapshot, unit conversions and the
//! snapshot codec.
//!
//! It has zero dependencies on the file system, async runtimes or UI
//! frameworks; the `prefs-store` crate supplies all of that.
//!
//! # Architecture overview (for beginners)
//!
//! NearbyWeather keeps a small, fixed set of user preferences: which
//! bookmarked location feeds the app-icon badge, how many nearby results to
//! fetch, which temperature and distance units to display, and how the list
//! is sorted.  This crate is the shared foundation for that store:
//!
//! - **`domain`** – Pure business types.  Every preference is its own Rust
//!   type whose values are exactly the legal members of its domain, so an
//!   invalid value simply cannot be represented.  The `PreferencesSnapshot`
//!   groups one value of each kind and is the unit of persistence.
//!
//! - **`codec`** – How a snapshot becomes text on disk and back again.  The
//!   document is TOML with stable camelCase keys and integer discriminants.

pub mod codec;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `prefs_core::TemperatureUnit` instead of `prefs_core::domain::option::TemperatureUnit`.
pub use codec::{decode_snapshot, encode_snapshot, CodecError};
pub use domain::option::{
    AmountOfResults, BookmarkId, BookmarkLookup, DistanceSpeedUnit, InvalidDiscriminant,
    OptionKind, PreferenceOption, PreferredBookmark, SideEffect, SortingOrientation,
    TemperatureUnit,
};
pub use domain::snapshot::{PreferencesSnapshot, CURRENT_SCHEMA_VERSION};
