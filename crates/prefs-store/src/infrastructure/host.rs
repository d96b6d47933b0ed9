//! Collaborators for the headless host binary.
//!
//! The headless build has no badge, no network client and no bookmark list,
//! so the sinks here only log what a GUI host would do.  The location
//! permission is fixed at start-up from `NEARBY_LOCATION_PERMISSION`.

use prefs_core::{BookmarkId, BookmarkLookup};
use tracing::info;

use super::storage::ConfigError;
use crate::application::ports::{BadgeRefresh, DataRefresh, LocationPermission};

/// Environment variable holding `granted` or `denied`.
pub const LOCATION_PERMISSION_ENV: &str = "NEARBY_LOCATION_PERMISSION";

/// Parses a permission setting; unset means denied.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for anything other than
/// `granted` or `denied` (case-insensitive).
pub fn parse_location_permission(value: Option<&str>) -> Result<bool, ConfigError> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("denied") => Ok(false),
        Some("granted") => Ok(true),
        Some(other) => Err(ConfigError::InvalidValue {
            variable: LOCATION_PERMISSION_ENV.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Location permission that never changes during the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationPermission {
    granted: bool,
}

impl FixedLocationPermission {
    pub fn new(granted: bool) -> Self {
        Self { granted }
    }

    /// Reads [`LOCATION_PERMISSION_ENV`].
    ///
    /// # Errors
    ///
    /// See [`parse_location_permission`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(LOCATION_PERMISSION_ENV).ok();
        Ok(Self::new(parse_location_permission(raw.as_deref())?))
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

impl LocationPermission for FixedLocationPermission {
    fn is_location_permission_granted(&self) -> bool {
        self.granted
    }
}

/// Logs badge-refresh requests.
#[derive(Debug, Default)]
pub struct LoggingBadgeRefresh;

impl BadgeRefresh for LoggingBadgeRefresh {
    fn request_badge_refresh(&self) {
        info!("badge refresh requested");
    }
}

/// Logs data-refresh requests.
#[derive(Debug, Default)]
pub struct LoggingDataRefresh;

impl DataRefresh for LoggingDataRefresh {
    fn request_data_refresh(&self) {
        info!("data refresh requested");
    }
}

/// Bookmark list with no entries.
#[derive(Debug, Default)]
pub struct NoBookmarks;

impl BookmarkLookup for NoBookmarks {
    fn resolve_bookmark_name(&self, _id: BookmarkId) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_permission_accepts_known_values() {
        assert!(!parse_location_permission(None).unwrap());
        assert!(!parse_location_permission(Some("denied")).unwrap());
        assert!(parse_location_permission(Some("granted")).unwrap());
        assert!(parse_location_permission(Some(" GRANTED ")).unwrap());
    }

    #[test]
    fn test_parse_location_permission_rejects_unknown_value() {
        let err = parse_location_permission(Some("maybe")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref value, .. } if value == "maybe"));
    }

    #[test]
    fn test_fixed_permission_reports_configured_value() {
        assert!(FixedLocationPermission::new(true).is_location_permission_granted());
        assert!(!FixedLocationPermission::new(false).is_location_permission_granted());
    }

    #[test]
    fn test_no_bookmarks_never_resolves() {
        assert_eq!(NoBookmarks.resolve_bookmark_name(5341145), None);
    }
}
