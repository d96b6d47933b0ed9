//! NearbyWeather preferences store, headless host.
//!
//! Wires the file-backed repository and the logging sinks into a
//! [`PreferencesStore`], then behaves like a foregrounded app until Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ StorageConfig::from_env()        -- NEARBY_PREFS_DIR
//!  └─ FixedLocationPermission::from_env() -- NEARBY_LOCATION_PERMISSION
//!  └─ PreferencesStore::instantiate()  -- load or defaults, revalidate
//!  └─ start services
//!       ├─ revalidation listener       (Tokio task)
//!       └─ preference-changed logger   (Tokio task)
//! ```

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use prefs_core::domain::conversion::temperature_descriptor;
use prefs_store::application::lifecycle::{spawn_revalidation_listener, LifecycleEvent};
use prefs_store::application::ports::{Collaborators, PreferenceChanged};
use prefs_store::application::preferences_store::PreferencesStore;
use prefs_store::infrastructure::events::EventBroadcaster;
use prefs_store::infrastructure::host::{
    FixedLocationPermission, LoggingBadgeRefresh, LoggingDataRefresh, NoBookmarks,
};
use prefs_store::infrastructure::storage::{FileSnapshotRepository, StorageConfig};

/// Freezing point, shown in the start-up summary as a unit preview.
const PREVIEW_KELVIN: f64 = 273.15;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("NearbyWeather preferences store starting");

    // ── Configuration ─────────────────────────────────────────────────────────
    let storage = StorageConfig::from_env();
    let repository = FileSnapshotRepository::from_config(&storage)?;
    let permission = FixedLocationPermission::from_env()?;
    info!(
        path = %repository.path().display(),
        location_permission = permission.is_granted(),
        "configuration loaded"
    );

    // ── Store ─────────────────────────────────────────────────────────────────
    let preference_changed = Arc::new(EventBroadcaster::<PreferenceChanged>::new());
    let collaborators = Collaborators {
        location_permission: Arc::new(permission),
        bookmarks: Arc::new(NoBookmarks),
        badge: Arc::new(LoggingBadgeRefresh),
        data: Arc::new(LoggingDataRefresh),
        preference_changed: preference_changed.clone(),
    };
    let store = PreferencesStore::instantiate(Arc::new(repository), collaborators).await?;

    let snapshot = store.snapshot();
    let preview = temperature_descriptor(snapshot.temperature_unit, PREVIEW_KELVIN)
        .unwrap_or_else(|| "-".to_string());
    info!(
        bookmark = %store.preferred_bookmark_name(),
        results = %snapshot.amount_of_results,
        temperature = %snapshot.temperature_unit,
        preview = %preview,
        units = %snapshot.distance_speed_unit,
        sorting = %snapshot.sorting_orientation,
        "preferences ready"
    );

    // ── Preference-changed logger ─────────────────────────────────────────────
    let mut changes = preference_changed.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = changes.recv().await {
            info!(?event, "observers notified");
        }
    });

    // ── Lifecycle ─────────────────────────────────────────────────────────────
    let lifecycle = EventBroadcaster::<LifecycleEvent>::new();
    let listener = spawn_revalidation_listener(Arc::downgrade(&store), lifecycle.subscribe());
    lifecycle.broadcast(LifecycleEvent::BecameActive);

    info!("preferences store ready.  Press Ctrl-C to exit.");

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
    }
    info!("shutdown signal received");

    drop(lifecycle);
    if let Err(e) = listener.await {
        warn!("lifecycle listener ended abnormally: {e}");
    }
    store.flush().await;

    info!("NearbyWeather preferences store stopped");
    Ok(())
}
