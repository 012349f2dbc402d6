use crate::importance::Importance;
use chrono::{DateTime, Local, TimeZone};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single journal record, alive only while the logger formats it.
#[derive(Debug, Clone, Copy)]
pub struct LogEntry<'a> {
    pub message: &'a str,
    pub importance: Importance,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl<'a> LogEntry<'a> {
    pub fn now(message: &'a str, importance: Importance) -> Self {
        Self::at(message, importance, Local::now())
    }

    pub fn at<Tz: TimeZone>(message: &'a str, importance: Importance, time: DateTime<Tz>) -> Self {
        Self {
            message,
            importance,
            timestamp: time.timestamp(),
        }
    }

    /// Render as `[YYYY-MM-DD HH:MM:SS] [LEVEL] message` in local time.
    pub fn format(&self) -> String {
        let stamp = Local
            .timestamp_opt(self.timestamp, 0)
            .single()
            .map(|time| time.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();

        format!("[{}] [{}] {}", stamp, self.importance, self.message)
    }
}
