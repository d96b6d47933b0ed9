//! In-memory doubles for unit and integration testing.
//!
//! Lets tests drive the store without touching the file system or a real
//! permission system, and inspect exactly which side effects fired.

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex, PoisonError,
};
use std::time::Duration;

use async_trait::async_trait;
use prefs_core::{decode_snapshot, encode_snapshot, BookmarkId, BookmarkLookup, PreferencesSnapshot};
use uuid::Uuid;

use crate::application::ports::{
    BadgeRefresh, Collaborators, DataRefresh, LocationPermission, PersistError,
    PreferenceChanged, PreferenceChangedSink, SnapshotRepository,
};

// ── Repository ────────────────────────────────────────────────────────────────

/// A [`SnapshotRepository`] that keeps the encoded document in memory.
///
/// The document goes through the real codec, so corrupt-document scenarios
/// behave like they would on disk.
pub struct InMemorySnapshotRepository {
    location: String,
    document: Mutex<Option<String>>,
    save_count: AtomicUsize,
    fail_saves: AtomicBool,
    save_delay: Option<Duration>,
}

impl InMemorySnapshotRepository {
    /// Creates an empty repository with a unique location.
    pub fn new() -> Self {
        Self::at_location(&format!("memory://{}", Uuid::new_v4()))
    }

    /// Creates an empty repository bound to `location`.
    pub fn at_location(location: &str) -> Self {
        Self {
            location: location.to_string(),
            document: Mutex::new(None),
            save_count: AtomicUsize::new(0),
            fail_saves: AtomicBool::new(false),
            save_delay: None,
        }
    }

    /// Creates a repository that already holds `snapshot`.
    pub fn with_snapshot(snapshot: &PreferencesSnapshot) -> Self {
        let document = encode_snapshot(snapshot).unwrap_or_default();
        Self::with_document(&document)
    }

    /// Creates a repository that already holds the raw `document` text.
    pub fn with_document(document: &str) -> Self {
        let repository = Self::new();
        *repository.lock_document() = Some(document.to_string());
        repository
    }

    /// Makes every save take at least `delay`.
    pub fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = Some(delay);
        self
    }

    /// Makes subsequent saves fail without touching the stored document.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of save attempts, successful or not.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// The stored document text.
    pub fn stored_document(&self) -> Option<String> {
        self.lock_document().clone()
    }

    /// The stored document decoded, or `None` if absent or undecodable.
    pub fn stored_snapshot(&self) -> Option<PreferencesSnapshot> {
        self.stored_document()
            .and_then(|document| decode_snapshot(&document).ok())
    }

    fn lock_document(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemorySnapshotRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    fn location(&self) -> String {
        self.location.clone()
    }

    async fn load(&self) -> Option<PreferencesSnapshot> {
        self.stored_snapshot()
    }

    async fn save(&self, snapshot: &PreferencesSnapshot) -> Result<(), PersistError> {
        self.save_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.save_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistError::Io {
                path: self.location.clone().into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "injected save failure"),
            });
        }
        let document = encode_snapshot(snapshot)?;
        *self.lock_document() = Some(document);
        Ok(())
    }
}

// ── Side-effect sinks ─────────────────────────────────────────────────────────

/// Records every side effect the store fires.
#[derive(Default)]
pub struct RecordingSinks {
    badge_refreshes: AtomicUsize,
    data_refreshes: AtomicUsize,
    published: Mutex<Vec<PreferenceChanged>>,
}

impl RecordingSinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn badge_refreshes(&self) -> usize {
        self.badge_refreshes.load(Ordering::SeqCst)
    }

    pub fn data_refreshes(&self) -> usize {
        self.data_refreshes.load(Ordering::SeqCst)
    }

    /// Every published event, oldest first.
    pub fn published(&self) -> Vec<PreferenceChanged> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BadgeRefresh for RecordingSinks {
    fn request_badge_refresh(&self) {
        self.badge_refreshes.fetch_add(1, Ordering::SeqCst);
    }
}

impl DataRefresh for RecordingSinks {
    fn request_data_refresh(&self) {
        self.data_refreshes.fetch_add(1, Ordering::SeqCst);
    }
}

impl PreferenceChangedSink for RecordingSinks {
    fn publish(&self, event: PreferenceChanged) {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

/// Controllable location permission and bookmark list.
pub struct FakeEnvironment {
    location_permission: AtomicBool,
    bookmarks: Mutex<HashMap<BookmarkId, String>>,
}

impl FakeEnvironment {
    pub fn new(location_permission: bool) -> Self {
        Self {
            location_permission: AtomicBool::new(location_permission),
            bookmarks: Mutex::new(HashMap::new()),
        }
    }

    /// Simulates the user granting or revoking location access.
    pub fn set_location_permission(&self, granted: bool) {
        self.location_permission.store(granted, Ordering::SeqCst);
    }

    pub fn add_bookmark(&self, id: BookmarkId, name: &str) {
        self.bookmarks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, name.to_string());
    }
}

impl LocationPermission for FakeEnvironment {
    fn is_location_permission_granted(&self) -> bool {
        self.location_permission.load(Ordering::SeqCst)
    }
}

impl BookmarkLookup for FakeEnvironment {
    fn resolve_bookmark_name(&self, id: BookmarkId) -> Option<String> {
        self.bookmarks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

/// Wires `environment` and `sinks` into a [`Collaborators`] bundle.
pub fn recording_collaborators(
    environment: &Arc<FakeEnvironment>,
    sinks: &Arc<RecordingSinks>,
) -> Collaborators {
    Collaborators {
        location_permission: environment.clone(),
        bookmarks: environment.clone(),
        badge: sinks.clone(),
        data: sinks.clone(),
        preference_changed: sinks.clone(),
    }
}
