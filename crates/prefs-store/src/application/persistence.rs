//! Single-writer, latest-wins background save queue.
//!
//! Setters must never block on disk I/O, yet the stored document must end up
//! holding the most recently committed snapshot.  [`PersistenceQueue`] hands
//! snapshots to one worker task through a `watch` slot:
//!
//! ```text
//! setter ──schedule(rev, snapshot)──► watch slot ──► worker ──► repository.save()
//!                                                      │
//! flush() ◄──────────── settled revision ◄─────────────┘
//! ```
//!
//! - The slot holds only the newest `(revision, snapshot)`.  A schedule call
//!   carrying an older revision than the one already in the slot is ignored,
//!   so a late arrival can never overwrite newer state.
//! - Snapshots scheduled while a save is in flight are coalesced: the worker
//!   picks up whatever is newest once the current save finishes.
//! - Exactly one worker exists, so at most one save is ever in flight.
//! - Each save runs in its own task.  A save that panics is logged like a
//!   failed save: its revision still settles and the worker keeps running.

use std::sync::Arc;

use prefs_core::PreferencesSnapshot;
use tokio::sync::watch;
use tracing::{debug, error, warn};

use super::ports::SnapshotRepository;

/// Monotonically increasing commit number assigned by the store.
pub type Revision = u64;

#[derive(Debug, Clone, Copy)]
struct PendingSave {
    revision: Revision,
    snapshot: PreferencesSnapshot,
}

/// Handle to the background save worker.
///
/// Dropping the handle lets the worker write the last pending snapshot and
/// then exit.
pub struct PersistenceQueue {
    pending: watch::Sender<Option<PendingSave>>,
    settled: watch::Receiver<Revision>,
}

impl PersistenceQueue {
    /// Spawns the worker task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(repository: Arc<dyn SnapshotRepository>) -> Self {
        let (pending_tx, pending_rx) = watch::channel(None);
        let (settled_tx, settled_rx) = watch::channel(0);
        tokio::spawn(run_worker(repository, pending_rx, settled_tx));
        Self {
            pending: pending_tx,
            settled: settled_rx,
        }
    }

    /// Queues `snapshot` for saving unless a newer revision is already queued.
    pub fn schedule(&self, revision: Revision, snapshot: PreferencesSnapshot) {
        let replaced = self.pending.send_if_modified(|slot| match slot {
            Some(current) if current.revision >= revision => false,
            _ => {
                *slot = Some(PendingSave { revision, snapshot });
                true
            }
        });
        if !replaced {
            debug!(revision, "stale snapshot not queued, a newer one is pending");
        }
    }

    /// Newest revision handed to [`schedule`](Self::schedule), or 0 if none.
    pub fn latest_scheduled(&self) -> Revision {
        (*self.pending.borrow()).map_or(0, |pending| pending.revision)
    }

    /// Newest revision whose save attempt has finished (successfully or not).
    pub fn latest_settled(&self) -> Revision {
        *self.settled.borrow()
    }

    /// Waits until every revision scheduled so far has settled.
    pub async fn flush(&self) {
        let target = self.latest_scheduled();
        let mut settled = self.settled.clone();
        if settled.wait_for(|&revision| revision >= target).await.is_err() {
            warn!(target, "persistence worker stopped before flush completed");
        }
    }
}

async fn run_worker(
    repository: Arc<dyn SnapshotRepository>,
    mut pending: watch::Receiver<Option<PendingSave>>,
    settled: watch::Sender<Revision>,
) {
    let location = repository.location();
    let mut last_saved: Revision = 0;

    loop {
        let closed = pending.changed().await.is_err();
        let next = *pending.borrow_and_update();

        if let Some(job) = next.filter(|job| job.revision > last_saved) {
            let save = tokio::spawn({
                let repository = Arc::clone(&repository);
                async move { repository.save(&job.snapshot).await }
            });
            match save.await {
                Ok(Ok(())) => debug!(revision = job.revision, %location, "preferences saved"),
                Ok(Err(e)) => warn!(revision = job.revision, %location, "failed to save preferences: {e}"),
                Err(e) => error!(revision = job.revision, %location, "save task aborted: {e}"),
            }
            last_saved = job.revision;
            settled.send_replace(job.revision);
        }

        if closed {
            debug!(%location, "persistence worker stopped");
            break;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
