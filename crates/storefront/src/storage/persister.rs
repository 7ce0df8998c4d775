//! Snapshot persistence decoupled from store mutations.
//!
//! Stores hand every post-mutation snapshot to a [`SnapshotPersister`]. The
//! persister serializes it and either writes it inline or queues it for a
//! dedicated writer thread. Every write carries the full state, so the writer
//! coalesces queued writes per key and only the newest one hits storage.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

use super::{KeyValueStore, StorageError};

enum WriterCommand {
    Write { key: String, value: String },
    Flush(oneshot::Sender<()>),
    Shutdown(oneshot::Sender<()>),
}

enum Mode {
    Immediate,
    WriteBehind(mpsc::UnboundedSender<WriterCommand>),
}

struct PersisterInner {
    storage: Arc<dyn KeyValueStore>,
    mode: Mode,
}

/// Hands store snapshots to durable storage.
///
/// Cheap to clone; clones share the same storage and writer.
#[derive(Clone)]
pub struct SnapshotPersister {
    inner: Arc<PersisterInner>,
}

impl fmt::Debug for SnapshotPersister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotPersister")
            .field("write_behind", &self.is_write_behind())
            .finish_non_exhaustive()
    }
}

impl SnapshotPersister {
    /// Persister that writes synchronously inside `persist`.
    #[must_use]
    pub fn immediate(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(PersisterInner {
                storage,
                mode: Mode::Immediate,
            }),
        }
    }

    /// Persister that queues writes for a background writer thread.
    ///
    /// The writer runs until [`shutdown`](Self::shutdown) is called or the
    /// last clone is dropped; queued writes are drained either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer thread cannot be spawned.
    pub fn write_behind(storage: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer_storage = Arc::clone(&storage);

        std::thread::Builder::new()
            .name("snapshot-writer".to_string())
            .spawn(move || run_writer(writer_storage.as_ref(), rx))?;

        Ok(Self {
            inner: Arc::new(PersisterInner {
                storage,
                mode: Mode::WriteBehind(tx),
            }),
        })
    }

    /// Check whether writes go through the background writer.
    #[must_use]
    pub fn is_write_behind(&self) -> bool {
        matches!(self.inner.mode, Mode::WriteBehind(_))
    }

    /// Get a reference to the underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.storage
    }

    /// Persist the full `snapshot` under `key`.
    ///
    /// Never fails: serialization and storage errors are logged and dropped.
    pub fn persist<T: Serialize>(&self, key: &str, snapshot: &T) {
        let value = match serde_json::to_string(snapshot) {
            Ok(value) => value,
            Err(e) => {
                error!(key, error = %e, "Failed to serialize snapshot");
                return;
            }
        };

        match &self.inner.mode {
            Mode::Immediate => write_snapshot(self.inner.storage.as_ref(), key, &value),
            Mode::WriteBehind(tx) => {
                let command = WriterCommand::Write {
                    key: key.to_string(),
                    value,
                };
                if tx.send(command).is_err() {
                    warn!(key, "Snapshot writer stopped, dropping snapshot");
                }
            }
        }
    }

    /// Load and decode the snapshot stored under `key`.
    ///
    /// Returns `None` when nothing is stored or the stored value is unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.inner.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read snapshot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable snapshot");
                None
            }
        }
    }

    /// Wait until every snapshot queued so far has been written.
    ///
    /// Returns immediately for an immediate persister.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriterStopped` if the writer is gone.
    pub async fn flush(&self) -> Result<(), StorageError> {
        self.send_and_wait(WriterCommand::Flush).await
    }

    /// Drain queued snapshots and stop the writer.
    ///
    /// Snapshots persisted after shutdown are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriterStopped` if the writer is already gone.
    pub async fn shutdown(&self) -> Result<(), StorageError> {
        self.send_and_wait(WriterCommand::Shutdown).await
    }

    async fn send_and_wait(
        &self,
        command: fn(oneshot::Sender<()>) -> WriterCommand,
    ) -> Result<(), StorageError> {
        let Mode::WriteBehind(tx) = &self.inner.mode else {
            return Ok(());
        };

        let (ack_tx, ack_rx) = oneshot::channel();
        tx.send(command(ack_tx))
            .map_err(|_| StorageError::WriterStopped)?;
        ack_rx.await.map_err(|_| StorageError::WriterStopped)
    }
}

fn write_snapshot(storage: &dyn KeyValueStore, key: &str, value: &str) {
    match storage.set(key, value) {
        Ok(()) => debug!(key, bytes = value.len(), "Snapshot written"),
        Err(e) => error!(key, error = %e, "Failed to write snapshot"),
    }
}

/// Writer thread loop.
///
/// Each wakeup drains everything already queued, keeps the newest snapshot
/// per key, writes those, then acknowledges flush and shutdown requests.
fn run_writer(storage: &dyn KeyValueStore, mut rx: mpsc::UnboundedReceiver<WriterCommand>) {
    let mut pending: HashMap<String, String> = HashMap::new();

    while let Some(first) = rx.blocking_recv() {
        let mut acks = Vec::new();
        let mut stop = false;
        let mut next = Some(first);

        while let Some(command) = next {
            match command {
                WriterCommand::Write { key, value } => {
                    pending.insert(key, value);
                }
                WriterCommand::Flush(ack) => acks.push(ack),
                WriterCommand::Shutdown(ack) => {
                    acks.push(ack);
                    stop = true;
                }
            }
            next = rx.try_recv().ok();
        }

        for (key, value) in pending.drain() {
            write_snapshot(storage, &key, &value);
        }
        for ack in acks {
            let _ = ack.send(());
        }
        if stop {
            debug!("Snapshot writer stopped");
            break;
        }
    }
}
