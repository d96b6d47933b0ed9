//! App lifecycle hook: revalidate preferences whenever the app becomes active.
//!
//! The host publishes [`LifecycleEvent`]s on a broadcast channel; the task
//! spawned by [`spawn_revalidation_listener`] runs
//! [`PreferencesStore::revalidate`] for every `BecameActive` event.
//!
//! The listener holds only a [`Weak`] reference, so it never keeps the store
//! alive.  It stops when the store is gone or the event channel closes.

use std::sync::Weak;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::preferences_store::PreferencesStore;

/// Host application lifecycle transitions the store reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The app came to the foreground.
    BecameActive,
}

/// Spawns a task that revalidates `store` on each `BecameActive` event.
pub fn spawn_revalidation_listener(
    store: Weak<PreferencesStore>,
    mut events: broadcast::Receiver<LifecycleEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(LifecycleEvent::BecameActive) => {}
                Err(RecvError::Lagged(skipped)) => {
                    // Any of the skipped events may have been BecameActive.
                    warn!(skipped, "lifecycle listener lagged, revalidating");
                }
                Err(RecvError::Closed) => {
                    debug!("lifecycle event channel closed, listener stopping");
                    break;
                }
            }

            let Some(live) = store.upgrade() else {
                debug!("preferences store dropped, listener stopping");
                break;
            };
            if live.revalidate() {
                info!("preferences revalidated after app became active");
            }
        }
    })
}
