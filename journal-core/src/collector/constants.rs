use std::time::Duration;

pub const BUFFER_SIZE: usize = 4096;
/// Longest unterminated line held back before it is flushed as a message.
pub const MAX_LINE_LEN: usize = 16 * BUFFER_SIZE;
pub const LAST_HOUR: i64 = 3600;
pub const IDLE_TICK: Duration = Duration::from_millis(250);
