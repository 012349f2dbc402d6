use crate::collector::{CollectorError, Framing, SessionSummary, StatsCollector};
use crate::conf::CollectorConfig;
use crate::importance::Importance;
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

fn local_config(report_every: u64, report_interval_secs: u64) -> CollectorConfig {
    CollectorConfig {
        host: "127.0.0.1".to_string(),
        ..CollectorConfig::new(0, report_every, report_interval_secs)
    }
}

/// Bind a collector, run it on a thread and return its address plus a
/// handle yielding the session summary and everything it reported.
fn spawn_collector(
    config: CollectorConfig,
) -> (
    std::net::SocketAddr,
    thread::JoinHandle<(SessionSummary, String)>,
) {
    let collector = StatsCollector::bind(&config).unwrap();
    let addr = collector.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let mut out = Vec::new();
        let summary = collector.run(&mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    });

    (addr, handle)
}

#[test]
fn test_counts_tagged_messages_per_importance() {
    // Arrange
    let (addr, handle) = spawn_collector(local_config(100, 3600));
    let mut client = TcpStream::connect(addr).unwrap();

    // Act
    client
        .write_all(
            b"[2023-01-01 12:00:00] [LOW] Message 1\n\
              [2023-01-01 12:00:00] [HIGH] Message 2\n\
              [2023-01-01 12:00:00] [MEDIUM] Message 3\n",
        )
        .unwrap();
    drop(client);
    let (summary, report) = handle.join().unwrap();
    let stats = &summary.stats;

    // Assert
    assert_eq!(stats.total(), 3);
    assert_eq!(stats.by_importance(Importance::Low), 1);
    assert_eq!(stats.by_importance(Importance::Medium), 1);
    assert_eq!(stats.by_importance(Importance::High), 1);
    assert_eq!(stats.last_hour_count(), 3);
    assert_eq!(summary.unreported, 3);
    assert!(report.is_empty(), "no trigger should have fired: {report}");
}

#[test]
fn test_reports_every_nth_message() {
    // Arrange
    let (addr, handle) = spawn_collector(local_config(2, 3600));
    let mut client = TcpStream::connect(addr).unwrap();

    // Act
    for i in 1..=5 {
        writeln!(client, "[HIGH] message {i}").unwrap();
    }
    drop(client);
    let (summary, report) = handle.join().unwrap();
    let stats = &summary.stats;

    // Assert
    assert_eq!(stats.total(), 5);
    assert_eq!(report.matches("=== Statistics ===").count(), 2);
    assert!(report.contains("Total messages: 2\n"));
    assert!(report.contains("Total messages: 4\n"));
    assert_eq!(summary.unreported, 1);
}

#[test]
fn test_idle_connection_reports_after_interval() {
    // Arrange
    let (addr, handle) = spawn_collector(local_config(100, 1));
    let mut client = TcpStream::connect(addr).unwrap();

    // Act
    client.write_all(b"[LOW] lonely\n").unwrap();
    thread::sleep(Duration::from_millis(1600));
    drop(client);
    let (summary, report) = handle.join().unwrap();
    let stats = &summary.stats;

    // Assert
    assert_eq!(stats.total(), 1);
    assert_eq!(report.matches("=== Statistics ===").count(), 1);
    assert!(report.contains("Total messages: 1\n"));
    assert_eq!(summary.unreported, 0);
}

#[test]
fn test_unterminated_last_line_is_counted() {
    let (addr, handle) = spawn_collector(local_config(100, 3600));
    let mut client = TcpStream::connect(addr).unwrap();

    client.write_all(b"[LOW] first\n[HIGH] second").unwrap();
    drop(client);
    let (summary, _) = handle.join().unwrap();
    let stats = &summary.stats;

    assert_eq!(stats.total(), 2);
    assert_eq!(stats.by_importance(Importance::High), 1);
}

#[test]
fn test_chunk_framing_counts_each_receive() {
    // Arrange
    let config = CollectorConfig {
        framing: Framing::Chunk,
        ..local_config(100, 3600)
    };
    let (addr, handle) = spawn_collector(config);
    let mut client = TcpStream::connect(addr).unwrap();

    // Act
    client.write_all(b"[LOW] one").unwrap();
    drop(client);
    let (summary, _) = handle.join().unwrap();
    let stats = &summary.stats;

    // Assert
    assert_eq!(stats.total(), 1);
    assert_eq!(stats.min_len(), "[LOW] one".len());
}

#[test]
fn test_bind_to_used_port_fails() {
    let first = StatsCollector::bind(&local_config(1, 1)).unwrap();
    let port = first.local_addr().unwrap().port();

    let err = StatsCollector::bind(&CollectorConfig {
        host: "127.0.0.1".to_string(),
        ..CollectorConfig::new(port, 1, 1)
    })
    .unwrap_err();

    assert!(err.to_string().contains("failed to bind"));
}

#[test]
fn test_last_count_report_leaves_nothing_unreported() {
    let (addr, handle) = spawn_collector(local_config(2, 3600));
    let mut client = TcpStream::connect(addr).unwrap();

    client.write_all(b"[LOW] a\n[HIGH] b\n").unwrap();
    drop(client);
    let (summary, report) = handle.join().unwrap();

    assert_eq!(summary.stats.total(), 2);
    assert_eq!(report.matches("=== Statistics ===").count(), 1);
    assert_eq!(summary.unreported, 0);
}

/// Report sink that rejects every write.
struct BrokenOutput;

impl Write for BrokenOutput {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_report_failure_closes_the_client() {
    // Arrange
    let collector = StatsCollector::bind(&local_config(1, 3600)).unwrap();
    let addr = collector.local_addr().unwrap();
    let handle = thread::spawn(move || collector.run(&mut BrokenOutput));
    let mut client = TcpStream::connect(addr).unwrap();
    client
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    // Act
    client.write_all(b"[LOW] first\n").unwrap();
    let result = handle.join().unwrap();

    // Assert
    assert!(matches!(result, Err(CollectorError::Report(_))));
    let mut buf = [0u8; 16];
    match client.read(&mut buf) {
        Ok(n) => assert_eq!(n, 0),
        Err(e) => assert!(
            !matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut),
            "connection was left open"
        ),
    }
}
