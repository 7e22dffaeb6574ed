//! Background execution of backend calls
//!
//! Backend calls block, so each one runs on its own short-lived thread and
//! reports back over a channel. Only the UI thread applies the results.

use crate::client::fallback::{fetch_models, run_or_mock};
use crate::client::{Answer, Backend, ModelList};
use super::state::RunJob;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of a background call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// Model listing finished (already passed through the stub fallback)
    Models(ModelList),
    /// Run finished (already passed through the mock fallback)
    Answer(Answer),
}

/// Starts a named background task
pub type Spawner = fn(&str, Box<dyn FnOnce() + Send>) -> io::Result<()>;

fn spawn_thread(name: &str, task: Box<dyn FnOnce() + Send>) -> io::Result<()> {
    thread::Builder::new()
        .name(format!("maire-{name}"))
        .spawn(task)
        .map(|_| ())
}

/// Spawns backend calls and collects their results
pub struct Worker {
    backend: Arc<dyn Backend>,
    spawner: Spawner,
    event_tx: Sender<WorkerEvent>,
    event_rx: Receiver<WorkerEvent>,
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("backend", &self.backend.kind())
            .finish_non_exhaustive()
    }
}

impl Worker {
    /// Create a worker sending calls to `backend`
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_spawner(backend, spawn_thread)
    }

    /// Create a worker that starts its tasks with `spawner`
    #[must_use]
    pub fn with_spawner(backend: Arc<dyn Backend>, spawner: Spawner) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            backend,
            spawner,
            event_tx,
            event_rx,
        }
    }

    /// Fetch the model list in the background. Returns whether the task started.
    #[must_use]
    pub fn fetch_models(&self) -> bool {
        let backend = Arc::clone(&self.backend);
        self.spawn("models", move || WorkerEvent::Models(fetch_models(backend.as_ref())))
    }

    /// Execute a run in the background. Returns whether the task started.
    #[must_use]
    pub fn submit(&self, job: RunJob) -> bool {
        let backend = Arc::clone(&self.backend);
        debug!(
            topology = %job.topology,
            models = job.active.len(),
            "Submitting run"
        );
        self.spawn("run", move || {
            WorkerEvent::Answer(run_or_mock(
                backend.as_ref(),
                &job.prompt,
                job.topology,
                &job.active,
            ))
        })
    }

    fn spawn<F>(&self, name: &str, call: F) -> bool
    where
        F: FnOnce() -> WorkerEvent + Send + 'static,
    {
        let tx = self.event_tx.clone();
        let task = Box::new(move || {
            // The receiver is gone only when the app is shutting down
            let _ = tx.send(call());
        });
        match (self.spawner)(name, task) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to spawn {name} worker: {e}");
                false
            }
        }
    }

    /// Take a finished result without blocking
    #[must_use]
    pub fn try_recv(&self) -> Option<WorkerEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished result
    #[must_use]
    pub fn wait(&self, timeout: Duration) -> Option<WorkerEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
