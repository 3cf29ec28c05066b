use crate::error::{ChatkeepError, Result};
use crate::storage::StorageBackend;

use serde::Serialize;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Outcome of a scheduled write. Dropping it leaves the write running.
#[must_use = "await the handle to observe persistence failures, or drop it to fire and forget"]
pub struct PersistHandle {
    state: HandleState,
}

enum HandleState {
    Spawned(JoinHandle<Result<()>>),
    Ready(Result<()>),
}

impl PersistHandle {
    fn spawned(handle: JoinHandle<Result<()>>) -> Self {
        Self {
            state: HandleState::Spawned(handle),
        }
    }

    fn ready(result: Result<()>) -> Self {
        Self {
            state: HandleState::Ready(result),
        }
    }

    /// Waits for the backend write and returns its result.
    pub async fn wait(self) -> Result<()> {
        match self.state {
            HandleState::Spawned(handle) => handle.await?,
            HandleState::Ready(result) => result,
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            HandleState::Spawned(handle) => handle.is_finished(),
            HandleState::Ready(_) => true,
        }
    }
}

impl fmt::Debug for PersistHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistHandle")
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Schedules writes of one key to one backend.
///
/// The snapshot is serialized when the mutation happens; the backend write
/// runs on the tokio blocking pool when a runtime is available and inline
/// otherwise. A snapshot older than one already written is skipped.
#[derive(Clone)]
pub(crate) struct WriteBehind {
    backend: Arc<dyn StorageBackend>,
    key: Arc<str>,
    generation: Rc<Cell<u64>>,
    written: Arc<Mutex<u64>>,
}

impl WriteBehind {
    pub(crate) fn new(backend: Arc<dyn StorageBackend>, key: impl Into<Arc<str>>) -> Self {
        Self {
            backend,
            key: key.into(),
            generation: Rc::new(Cell::new(0)),
            written: Arc::new(Mutex::new(0)),
        }
    }

    pub(crate) fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Serializes `snapshot` now and writes it in the background.
    pub(crate) fn schedule<T: Serialize>(&self, snapshot: &T) -> PersistHandle {
        let job = match self.prepare(snapshot) {
            Ok(job) => job,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to serialize sessions");
                return PersistHandle::ready(Err(e));
            }
        };

        match Handle::try_current() {
            Ok(runtime) => PersistHandle::spawned(runtime.spawn_blocking(move || job.run())),
            Err(_) => PersistHandle::ready(job.run()),
        }
    }

    /// Serializes and writes `snapshot` on the calling thread.
    pub(crate) fn write_now<T: Serialize>(&self, snapshot: &T) -> Result<()> {
        self.prepare(snapshot)?.run()
    }

    fn prepare<T: Serialize>(&self, snapshot: &T) -> Result<WriteJob> {
        let payload = serde_json::to_string(snapshot)?;
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        Ok(WriteJob {
            backend: Arc::clone(&self.backend),
            key: Arc::clone(&self.key),
            payload,
            generation,
            written: Arc::clone(&self.written),
        })
    }
}

struct WriteJob {
    backend: Arc<dyn StorageBackend>,
    key: Arc<str>,
    payload: String,
    generation: u64,
    written: Arc<Mutex<u64>>,
}

impl WriteJob {
    fn run(self) -> Result<()> {
        let mut written = self
            .written
            .lock()
            .map_err(|_| ChatkeepError::Storage("persistence lock poisoned".to_string()))?;

        if *written > self.generation {
            tracing::debug!(
                key = %self.key,
                generation = self.generation,
                newest = *written,
                "skipping stale snapshot"
            );
            return Ok(());
        }

        match self.backend.write(&self.key, &self.payload) {
            Ok(()) => {
                *written = self.generation;
                tracing::debug!(
                    key = %self.key,
                    generation = self.generation,
                    bytes = self.payload.len(),
                    "persisted sessions"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    generation = self.generation,
                    error = %e,
                    "failed to persist sessions"
                );
                Err(e)
            }
        }
    }
}
