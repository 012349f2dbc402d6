//! Stream Stats Collector
//!
//! Listens on a TCP port, accepts a single journal client and keeps running
//! statistics over everything it sends: message count, per-importance
//! counts, message length min/max/mean and how many messages arrived in the
//! last hour.
//!
//! A report is printed whenever the N-th message arrives or T seconds have
//! passed since the previous report, whichever comes first.
//!
//! The socket is read on its own thread. That thread only frames bytes into
//! messages and forwards them over a channel; the aggregate lives on the
//! collector loop alone, so nothing needs a lock.
//!
//! The overall data processing architecture is:
//!
//! TcpStream
//! reader thread (Framer)
//! mpsc::Receiver<ReaderEvent>
//! MessageStats
//! ReportTrigger
//! render_report
//!

mod constants;
mod error;
mod framing;
mod render;
mod server;
mod stats;
mod trigger;

#[cfg(test)]
mod tests;

pub use constants::{BUFFER_SIZE, IDLE_TICK, LAST_HOUR, MAX_LINE_LEN};
pub use error::CollectorError;
pub use framing::{Framer, Framing};
pub use render::render_report;
pub use server::{SessionSummary, StatsCollector};
pub use stats::MessageStats;
pub use trigger::ReportTrigger;
