use crate::importance::Importance;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

/// One unit of work handed from a producer to the journal worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub message: String,
    pub importance: Importance,
}

impl Task {
    pub fn new(message: impl Into<String>, importance: Importance) -> Self {
        Self {
            message: message.into(),
            importance,
        }
    }
}

#[derive(Debug, Default)]
struct QueueState {
    tasks: VecDeque<Task>,
    shutdown: bool,
}

/// Unbounded FIFO between any number of producers and one consumer.
///
/// Invariants:
/// - `pop` returns tasks in push order
/// - `pop` reports closed only once the queue is shut down *and* drained
/// - `shutdown` wakes every waiting consumer
#[derive(Debug, Default)]
pub struct TaskQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, task: Task) {
        self.lock().tasks.push_back(task);
        self.available.notify_one();
    }

    /// Like `push`, but hands the task back once the queue is shut down.
    /// The check and the append happen under one lock, so an accepted task
    /// is always seen by a consumer draining the queue.
    pub fn try_push(&self, task: Task) -> Result<(), Task> {
        let mut state = self.lock();
        if state.shutdown {
            return Err(task);
        }
        state.tasks.push_back(task);
        drop(state);
        self.available.notify_one();
        Ok(())
    }

    /// Block until a task is available or the queue is closed.
    ///
    /// Returns `None` only when the queue has been shut down and is empty.
    pub fn pop(&self) -> Option<Task> {
        let mut state = self.lock();
        loop {
            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }
            if state.shutdown {
                return None;
            }
            state = self
                .available
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    pub fn shutdown(&self) {
        self.lock().shutdown = true;
        self.available.notify_all();
    }

    /// Discard every queued task, returning how many there were.
    pub fn clear(&self) -> usize {
        let mut state = self.lock();
        let dropped = state.tasks.len();
        state.tasks.clear();
        dropped
    }

    pub fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }

    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }

    // A panicking producer cannot leave the deque half-updated, so a poisoned
    // lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
