//! PreferencesStore: the single owner and mutator of the settings snapshot.
//!
//! The store holds the current value of every option kind, hands out copies
//! to readers, and runs the same pipeline for every mutation:
//!
//! ```text
//! set_xxx(value)
//!  └─ commit under write lock   -- new value + next revision
//!  └─ fire side effects         -- badge / data refresh / broadcast
//!  └─ schedule save             -- PersistenceQueue (latest wins)
//! ```
//!
//! Setters fire on every call, including when the value is unchanged, so a
//! host can use a no-op write to force a refresh.
//!
//! # Single instance per location
//!
//! Two stores writing the same document would race each other.  Construction
//! therefore claims the repository's [`location`](SnapshotRepository::location)
//! in a process-wide registry and fails with
//! [`StoreError::AlreadyInitialized`] while another store holds it.  The claim
//! is released when the store is dropped.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use prefs_core::{
    AmountOfResults, DistanceSpeedUnit, OptionKind, PreferencesSnapshot, PreferredBookmark,
    SideEffect, SortingOrientation, TemperatureUnit,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::persistence::{PersistenceQueue, Revision};
use super::ports::{Collaborators, PreferenceChanged, SnapshotRepository};

/// Locations currently bound to a live store.
static LIVE_LOCATIONS: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Error type for store construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Another live store already owns this storage location.
    #[error("a preferences store is already initialized for {location}")]
    AlreadyInitialized { location: String },
}

/// Registry entry held for as long as a store is alive.
#[derive(Debug)]
struct LocationClaim(String);

impl LocationClaim {
    fn acquire(location: String) -> Result<Self, StoreError> {
        let mut live = LIVE_LOCATIONS
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if live.contains(&location) {
            return Err(StoreError::AlreadyInitialized { location });
        }
        live.push(location.clone());
        Ok(Self(location))
    }
}

impl Drop for LocationClaim {
    fn drop(&mut self) {
        let mut live = LIVE_LOCATIONS
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        live.retain(|location| *location != self.0);
    }
}

#[derive(Debug)]
struct StoreState {
    snapshot: PreferencesSnapshot,
    revision: Revision,
}

/// The preferences store.
///
/// Construct with [`PreferencesStore::instantiate`] and share the returned
/// `Arc` with every consumer.
pub struct PreferencesStore {
    state: RwLock<StoreState>,
    collaborators: Collaborators,
    queue: PersistenceQueue,
    claim: LocationClaim,
}

impl PreferencesStore {
    /// Loads the stored snapshot (or defaults) and starts the save worker.
    ///
    /// The revalidation rule runs once before the store is returned, so a
    /// stored distance orientation never survives a launch without location
    /// permission.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyInitialized`] if another live store is
    /// bound to the same repository location.
    pub async fn instantiate(
        repository: Arc<dyn SnapshotRepository>,
        collaborators: Collaborators,
    ) -> Result<Arc<Self>, StoreError> {
        let claim = LocationClaim::acquire(repository.location())?;

        let snapshot = match repository.load().await {
            Some(snapshot) => {
                info!(location = %claim.0, "loaded stored preferences");
                snapshot
            }
            None => {
                info!(location = %claim.0, "no usable stored preferences, using defaults");
                PreferencesSnapshot::default()
            }
        };

        let store = Arc::new(Self {
            state: RwLock::new(StoreState {
                snapshot,
                revision: 0,
            }),
            collaborators,
            queue: PersistenceQueue::spawn(repository),
            claim,
        });
        store.revalidate();
        Ok(store)
    }

    /// The storage location this store is bound to.
    pub fn location(&self) -> &str {
        &self.claim.0
    }

    // ── Readers ───────────────────────────────────────────────────────────────

    /// A consistent copy of every current option value.
    pub fn snapshot(&self) -> PreferencesSnapshot {
        self.read_state().snapshot
    }

    pub fn preferred_bookmark(&self) -> PreferredBookmark {
        self.read_state().snapshot.preferred_bookmark
    }

    pub fn amount_of_results(&self) -> AmountOfResults {
        self.read_state().snapshot.amount_of_results
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.read_state().snapshot.temperature_unit
    }

    pub fn distance_speed_unit(&self) -> DistanceSpeedUnit {
        self.read_state().snapshot.distance_speed_unit
    }

    pub fn sorting_orientation(&self) -> SortingOrientation {
        self.read_state().snapshot.sorting_orientation
    }

    /// Display name of the preferred bookmark, or `"None"`.
    pub fn preferred_bookmark_name(&self) -> String {
        self.preferred_bookmark()
            .display_string(self.collaborators.bookmarks.as_ref())
    }

    // ── Setters ───────────────────────────────────────────────────────────────

    pub fn set_preferred_bookmark(&self, value: PreferredBookmark) {
        self.commit(OptionKind::PreferredBookmark, |s| s.preferred_bookmark = value);
    }

    pub fn set_amount_of_results(&self, value: AmountOfResults) {
        self.commit(OptionKind::AmountOfResults, |s| s.amount_of_results = value);
    }

    pub fn set_temperature_unit(&self, value: TemperatureUnit) {
        self.commit(OptionKind::TemperatureUnit, |s| s.temperature_unit = value);
    }

    pub fn set_distance_speed_unit(&self, value: DistanceSpeedUnit) {
        self.commit(OptionKind::DistanceSpeedUnit, |s| s.distance_speed_unit = value);
    }

    /// Sets the sort orientation and returns the value actually stored.
    ///
    /// Sorting by distance requires location permission; without it the
    /// store keeps `Name` instead.  Permission is checked while the state
    /// lock is held, so a concurrent [`revalidate`](Self::revalidate) can
    /// never slip in between the check and the write.
    pub fn set_sorting_orientation(&self, value: SortingOrientation) -> SortingOrientation {
        let committed = self.commit(OptionKind::SortingOrientation, |s| {
            s.sorting_orientation = if value.requires_location_permission()
                && !self.location_permission_granted()
            {
                warn!(requested = %value, "location permission not granted, sorting by name instead");
                SortingOrientation::Name
            } else {
                value
            };
        });
        committed.sorting_orientation
    }

    // ── Revalidation ──────────────────────────────────────────────────────────

    /// Resets options whose preconditions no longer hold.
    ///
    /// Returns `true` if a value was changed.  Calling it again in a valid
    /// state does nothing.  The current orientation and the permission are
    /// read under the same lock as the reset, so a value written by a
    /// concurrent setter is never overwritten by a stale decision.
    pub fn revalidate(&self) -> bool {
        let reset = self.commit_if(OptionKind::SortingOrientation, |s| {
            if !s.sorting_orientation.requires_location_permission()
                || self.location_permission_granted()
            {
                return false;
            }
            s.sorting_orientation = SortingOrientation::Name;
            true
        });
        if reset.is_some() {
            info!("location permission revoked, sort orientation reset to name");
        }
        reset.is_some()
    }

    /// Waits until every change committed so far has been saved or has failed.
    pub async fn flush(&self) {
        self.queue.flush().await;
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn commit(
        &self,
        kind: OptionKind,
        apply: impl FnOnce(&mut PreferencesSnapshot),
    ) -> PreferencesSnapshot {
        self.commit_if(kind, move |s| {
            apply(s);
            true
        })
        .unwrap_or_else(|| self.snapshot())
    }

    /// Applies `apply` under the write lock; a `false` return leaves the
    /// revision untouched and fires nothing.
    fn commit_if(
        &self,
        kind: OptionKind,
        apply: impl FnOnce(&mut PreferencesSnapshot) -> bool,
    ) -> Option<PreferencesSnapshot> {
        let (revision, snapshot) = {
            let mut state = self.write_state();
            if !apply(&mut state.snapshot) {
                return None;
            }
            state.revision += 1;
            (state.revision, state.snapshot)
        };
        debug!(%kind, revision, "preference committed");

        self.fire_side_effects(kind, &snapshot);
        self.queue.schedule(revision, snapshot);
        Some(snapshot)
    }

    fn fire_side_effects(&self, kind: OptionKind, snapshot: &PreferencesSnapshot) {
        for effect in kind.side_effects() {
            match effect {
                SideEffect::BadgeRefresh => self.collaborators.badge.request_badge_refresh(),
                SideEffect::DataRefresh => self.collaborators.data.request_data_refresh(),
                SideEffect::PreferenceChangedBroadcast => {
                    self.collaborators
                        .preference_changed
                        .publish(PreferenceChanged::SortingOrientationChanged(
                            snapshot.sorting_orientation,
                        ))
                }
            }
        }
    }

    fn location_permission_granted(&self) -> bool {
        self.collaborators
            .location_permission
            .is_location_permission_granted()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PreferencesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferencesStore")
            .field("location", &self.claim.0)
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
