use journal_core::collector::{MessageStats, StatsCollector};
use journal_core::conf::CollectorConfig;
use std::net::SocketAddr;
use std::thread::{self, JoinHandle};

/// What a collector saw by the time its client went away.
#[derive(Debug)]
pub struct CollectorRun {
    pub stats: MessageStats,
    pub unreported: u64,
    pub reports: String,
}

impl CollectorRun {
    pub fn report_count(&self) -> usize {
        self.reports.matches("=== Statistics ===").count()
    }
}

/// Handle to a collector serving one client on a background thread.
pub struct TestCollector {
    addr: SocketAddr,
    handle: JoinHandle<CollectorRun>,
}

impl TestCollector {
    /// Bind on an ephemeral localhost port and start accepting.
    pub fn start(report_every: u64, report_interval_secs: u64) -> Self {
        let config = CollectorConfig {
            host: "127.0.0.1".to_string(),
            ..CollectorConfig::new(0, report_every, report_interval_secs)
        };
        Self::start_with(config)
    }

    pub fn start_with(config: CollectorConfig) -> Self {
        let collector = StatsCollector::bind(&config).expect("failed to bind collector");
        let addr = collector.local_addr().expect("collector has no local address");

        let handle = thread::spawn(move || {
            let mut out = Vec::new();
            let summary = collector.run(&mut out).expect("collector failed");
            CollectorRun {
                stats: summary.stats,
                unreported: summary.unreported,
                reports: String::from_utf8_lossy(&out).into_owned(),
            }
        });

        Self { addr, handle }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Wait for the client to disconnect and return what was collected.
    pub fn finish(self) -> CollectorRun {
        self.handle.join().expect("collector thread panicked")
    }
}

/// Allocate a free port on localhost.
/// Nothing listens on it once this returns.
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
