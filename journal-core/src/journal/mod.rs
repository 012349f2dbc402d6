//! Asynchronous journal pipeline
//!
//! Producers hand `Task`s to a `LogManager`, which queues them and lets one
//! dedicated worker thread push them through a `Logger` into its `Sink`:
//!
//! caller
//! LogManager::log
//! TaskQueue
//! journal-worker thread
//! Logger (filter + format)
//! Sink (file, socket, or socket mirrored onto a file)
//!
//! Producers never wait on sink I/O; the queue is the only state shared
//! between them and the worker.

mod entry;
mod error;
mod logger;
mod manager;
mod queue;
pub mod sink;

#[cfg(test)]
mod tests;

pub use entry::{LogEntry, TIMESTAMP_FORMAT};
pub use error::JournalError;
pub use logger::Logger;
pub use manager::LogManager;
pub use queue::{Task, TaskQueue};
