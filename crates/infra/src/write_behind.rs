//! Background worker that applies persistence intents in order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::persistence::PersistIntent;
use crate::storage::KeyValueStore;

#[derive(Debug)]
enum Job {
    Persist(PersistIntent),
    Flush(oneshot::Sender<()>),
}

/// Ordered write-behind queue in front of a [`KeyValueStore`].
///
/// Intents are applied one at a time in enqueue order. Failures are logged and
/// counted; the queue keeps going. [`WriteBehind::flush`] resolves once every
/// intent enqueued before it has been applied (or has failed).
#[derive(Debug)]
pub struct WriteBehind {
    tx: mpsc::UnboundedSender<Job>,
    handle: JoinHandle<()>,
    applied: Arc<AtomicU64>,
    failures: Arc<AtomicU64>,
}

impl WriteBehind {
    /// Start the worker on the current tokio runtime.
    pub fn spawn<S>(store: Arc<S>) -> Self
    where
        S: KeyValueStore + ?Sized + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let applied = Arc::new(AtomicU64::new(0));
        let failures = Arc::new(AtomicU64::new(0));

        let worker_applied = applied.clone();
        let worker_failures = failures.clone();

        let handle = tokio::spawn(async move {
            tracing::info!("write-behind worker started");

            while let Some(job) = rx.recv().await {
                match job {
                    Job::Persist(intent) => {
                        let key = intent.key();
                        match intent.execute(store.as_ref()).await {
                            Ok(()) => {
                                worker_applied.fetch_add(1, Ordering::SeqCst);
                                tracing::debug!(%key, "persisted");
                            }
                            Err(err) => {
                                worker_failures.fetch_add(1, Ordering::SeqCst);
                                tracing::warn!(%key, "write-behind persistence failed: {err}");
                            }
                        }
                    }
                    Job::Flush(ack) => {
                        // Receiver may have given up waiting; nothing to do then.
                        let _ = ack.send(());
                    }
                }
            }

            tracing::info!("write-behind worker stopped");
        });

        Self {
            tx,
            handle,
            applied,
            failures,
        }
    }

    /// Queue an intent. Never blocks.
    pub fn enqueue(&self, intent: PersistIntent) {
        let key = intent.key();
        if self.tx.send(Job::Persist(intent)).is_err() {
            tracing::warn!(%key, "write-behind worker is gone; dropping intent");
        }
    }

    /// Queue every intent from `intents`, preserving order.
    pub fn enqueue_all(&self, intents: impl IntoIterator<Item = PersistIntent>) {
        for intent in intents {
            self.enqueue(intent);
        }
    }

    /// Wait until everything enqueued so far has been processed.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Job::Flush(ack_tx)).is_err() {
            return;
        }
        if ack_rx.await.is_err() {
            tracing::warn!("write-behind worker stopped before acknowledging flush");
        }
    }

    /// Number of intents written successfully.
    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::SeqCst)
    }

    /// Number of intents whose write failed.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::SeqCst)
    }

    /// Drain the queue and stop the worker.
    pub async fn shutdown(self) {
        let Self { tx, handle, .. } = self;
        drop(tx);
        if let Err(err) = handle.await {
            tracing::error!("write-behind worker panicked: {err}");
        }
    }
}
