//! Collaborator contracts the preferences store depends on.
//!
//! The store never talks to the file system, the permission system or the UI
//! directly.  Instead it is handed trait objects at construction time:
//!
//! - [`SnapshotRepository`] – loads and saves the whole snapshot.
//! - [`LocationPermission`] – answers whether location access is granted.
//! - [`BadgeRefresh`] / [`DataRefresh`] – side-effect triggers.
//! - [`PreferenceChangedSink`] – broadcast channel for UI observers.
//! - [`BookmarkLookup`] – resolves bookmark identifiers to station names.
//!
//! Infrastructure supplies the real implementations; tests use the recording
//! doubles from `infrastructure::mock`.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use prefs_core::{CodecError, PreferencesSnapshot, SortingOrientation};
use thiserror::Error;

pub use prefs_core::BookmarkLookup;

/// Error type for a failed snapshot save.
#[derive(Debug, Error)]
pub enum PersistError {
    /// A file system I/O error occurred.
    #[error("I/O error persisting preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Durable storage for the settings snapshot.
///
/// `load` never fails past this boundary: a missing, unreadable or
/// undecodable document is reported as `None` so the caller can fall back to
/// defaults.  `save` replaces the stored document as a whole and must leave
/// the previous document intact if it fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Stable identifier of the backing storage (e.g. the file path).
    ///
    /// At most one live store may be bound to a given location.
    fn location(&self) -> String;

    /// Reads the stored snapshot, or `None` if there is nothing usable.
    async fn load(&self) -> Option<PreferencesSnapshot>;

    /// Replaces the stored snapshot with `snapshot`.
    async fn save(&self, snapshot: &PreferencesSnapshot) -> Result<(), PersistError>;
}

/// Live query of the location-permission precondition.
///
/// The store queries this while holding its state lock, so implementations
/// must answer without calling back into the store.
pub trait LocationPermission: Send + Sync {
    fn is_location_permission_granted(&self) -> bool;
}

/// Recomputes the app-icon badge from the preferred bookmark's temperature.
pub trait BadgeRefresh: Send + Sync {
    fn request_badge_refresh(&self);
}

/// Refetches the nearby result set.
pub trait DataRefresh: Send + Sync {
    fn request_data_refresh(&self);
}

/// Notification published to UI observers when a preference changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceChanged {
    /// The list must be re-sorted using the carried orientation.
    SortingOrientationChanged(SortingOrientation),
}

/// Receives [`PreferenceChanged`] notifications.
pub trait PreferenceChangedSink: Send + Sync {
    fn publish(&self, event: PreferenceChanged);
}

/// The full set of collaborators injected into a store.
#[derive(Clone)]
pub struct Collaborators {
    pub location_permission: Arc<dyn LocationPermission>,
    pub bookmarks: Arc<dyn BookmarkLookup>,
    pub badge: Arc<dyn BadgeRefresh>,
    pub data: Arc<dyn DataRefresh>,
    pub preference_changed: Arc<dyn PreferenceChangedSink>,
}
