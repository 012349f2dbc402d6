use super::test_helpers::{RecordingSink, read_lines, without_timestamp};
use crate::importance::Importance;
use crate::journal::{JournalError, Logger};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

#[test]
fn test_log_writes_iff_importance_reaches_threshold() {
    for threshold in Importance::ALL {
        for importance in Importance::ALL {
            // Arrange
            let sink = RecordingSink::default();
            let mut logger = Logger::new(sink.clone(), threshold);

            // Act
            logger.log("probe", importance).unwrap();

            // Assert
            let written = !sink.lines().is_empty();
            assert_eq!(
                written,
                importance >= threshold,
                "importance {importance} against threshold {threshold}"
            );
        }
    }
}

#[test]
fn test_filtering_drops_low_and_keeps_high() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test_filter.log");
    let mut logger = Logger::to_file(&path, Importance::Medium).unwrap();

    // Act
    logger.log("Low message", Importance::Low).unwrap();
    logger.log("High message", Importance::High).unwrap();

    // Assert
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("High message"));
    assert!(!lines[0].contains("Low message"));
}

#[test]
fn test_file_is_created_on_construction() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test_creation.log");

    {
        let mut logger = Logger::to_file(&path, Importance::Low).unwrap();
        logger.log("Test message", Importance::Low).unwrap();
    }

    assert!(path.exists());
}

#[test]
fn test_log_line_format() {
    let sink = RecordingSink::default();
    let mut logger = Logger::new(sink.clone(), Importance::Low);

    logger.log("Test format", Importance::Medium).unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(without_timestamp(&lines[0]), "[MEDIUM] Test format");

    // [YYYY-MM-DD HH:MM:SS]
    let stamp = &lines[0][1..20];
    assert_eq!(stamp.len(), 19);
    assert_eq!(&stamp[4..5], "-");
    assert_eq!(&stamp[7..8], "-");
    assert_eq!(&stamp[10..11], " ");
    assert_eq!(&stamp[13..14], ":");
    assert_eq!(&stamp[16..17], ":");
}

#[test]
fn test_set_default_importance_applies_to_later_calls() {
    let sink = RecordingSink::default();
    let mut logger = Logger::new(sink.clone(), Importance::High);

    logger.log("hidden", Importance::Medium).unwrap();
    logger.set_default_importance(Importance::Low);
    logger.log("Now visible", Importance::Medium).unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Now visible"));
    assert_eq!(logger.default_importance(), Importance::Low);
}

#[test]
fn test_empty_message_is_rejected() {
    let sink = RecordingSink::default();
    let mut logger = Logger::new(sink.clone(), Importance::Low);

    let err = logger.log("", Importance::Medium).unwrap_err();
    assert!(matches!(err, JournalError::EmptyMessage));
    assert!(err.to_string().contains("cannot be empty"));

    let err = logger.log("\nleading newline", Importance::High).unwrap_err();
    assert!(matches!(err, JournalError::EmptyMessage));

    assert!(sink.lines().is_empty());
}

#[test]
fn test_empty_message_below_threshold_is_still_dropped_silently() {
    let sink = RecordingSink::default();
    let mut logger = Logger::new(sink.clone(), Importance::High);

    assert!(logger.log("", Importance::Low).is_ok());
    assert!(sink.lines().is_empty());
}

#[test]
fn test_log_default_uses_current_default_importance() {
    let sink = RecordingSink::default();
    let mut logger = Logger::new(sink.clone(), Importance::Medium);

    logger.log_default("Test message").unwrap();

    let lines = sink.lines();
    assert_eq!(without_timestamp(&lines[0]), "[MEDIUM] Test message");
}

#[test]
fn test_two_threads_sharing_a_file_logger_write_every_line() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test_thread.log");
    let logger = Arc::new(Mutex::new(
        Logger::to_file(&path, Importance::Low).unwrap(),
    ));

    // Act
    let workers: Vec<_> = (1..=2)
        .map(|id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..10 {
                    logger
                        .lock()
                        .unwrap()
                        .log(&format!("Thread {id} message {i}"), Importance::Low)
                        .unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    // Assert
    assert_eq!(read_lines(&path).len(), 20);
}

#[test]
fn test_close_then_log_reopens_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reopen.log");
    let mut logger = Logger::to_file(&path, Importance::Low).unwrap();

    logger.log("before close", Importance::Low).unwrap();
    logger.close().unwrap();
    assert!(!logger.is_connected());

    logger.log("after close", Importance::Low).unwrap();
    assert!(logger.is_connected());

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with("[LOW] after close"));
}
