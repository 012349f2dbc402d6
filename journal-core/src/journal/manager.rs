use crate::importance::Importance;
use crate::journal::error::JournalError;
use crate::journal::logger::Logger;
use crate::journal::queue::{Task, TaskQueue};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

const WORKER_NAME: &str = "journal-worker";

/// Owns a `Logger`, the task queue feeding it and the worker thread draining
/// that queue.
///
/// All methods take `&self`, so one manager can be shared by any number of
/// producer threads (through `Arc` or scoped threads).
///
/// Invariants:
/// - every task passed to `log` before `stop` is handed to the logger before
///   the worker exits
/// - `stop` is idempotent and also runs on drop
pub struct LogManager {
    queue: Arc<TaskQueue>,
    logger: Mutex<Option<Logger>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    running: AtomicBool,
    processed: Arc<AtomicU64>,
}

impl LogManager {
    pub fn new(logger: Logger) -> Self {
        Self {
            queue: Arc::new(TaskQueue::new()),
            logger: Mutex::new(Some(logger)),
            worker: Mutex::new(None),
            running: AtomicBool::new(false),
            processed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Build a manager and launch its worker.
    pub fn spawn(logger: Logger) -> Result<Self, JournalError> {
        let manager = Self::new(logger);
        manager.start()?;
        Ok(manager)
    }

    pub fn start(&self) -> Result<(), JournalError> {
        let mut worker = lock(&self.worker);
        let logger = lock(&self.logger)
            .take()
            .ok_or(JournalError::AlreadyStarted)?;

        let queue = Arc::clone(&self.queue);
        let processed = Arc::clone(&self.processed);
        let handle = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || run_worker(&queue, logger, &processed))
            .map_err(JournalError::Spawn)?;

        *worker = Some(handle);
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Queue a message for the worker. Never waits on sink I/O.
    ///
    /// Once `stop` has been called the message is dropped with a warning.
    pub fn log(&self, message: impl Into<String>, importance: Importance) {
        if let Err(task) = self.queue.try_push(Task::new(message, importance)) {
            warn!(
                importance = %task.importance,
                "journal already stopped, message dropped"
            );
        }
    }

    /// Shut the queue down, let the worker drain it and wait for it to exit.
    pub fn stop(&self) -> Result<(), JournalError> {
        self.running.store(false, Ordering::SeqCst);
        self.queue.shutdown();

        let Some(handle) = lock(&self.worker).take() else {
            // Never started, or already joined. Only the first case can
            // leave tasks behind.
            let dropped = self.queue.clear();
            if dropped > 0 {
                warn!(dropped, "journal stopped before its worker started, tasks dropped");
            }
            return Ok(());
        };

        handle.join().map_err(|_| JournalError::WorkerPanicked)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Tasks queued but not yet picked up by the worker.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Tasks the worker has handed to the logger so far.
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::SeqCst)
    }
}

impl Drop for LogManager {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            error!(error = %e, "journal shutdown failed");
        }
    }
}

fn run_worker(queue: &TaskQueue, mut logger: Logger, processed: &AtomicU64) {
    debug!("journal worker started");

    while let Some(task) = queue.pop() {
        if let Err(e) = logger.log(&task.message, task.importance) {
            error!(
                error = %e,
                importance = %task.importance,
                "failed to write journal entry"
            );
        }
        processed.fetch_add(1, Ordering::SeqCst);
    }

    if let Err(e) = logger.close() {
        warn!(error = %e, "failed to close journal sink");
    }

    debug!(
        processed = processed.load(Ordering::SeqCst),
        "journal worker stopped"
    );
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
