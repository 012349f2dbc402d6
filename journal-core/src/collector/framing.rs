use crate::collector::constants::MAX_LINE_LEN;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How received bytes are cut into messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    /// One message per `\n`-terminated line; partial lines are carried over
    /// to the next read.
    #[default]
    Line,
    /// One message per successful read, whatever it contains. Messages that
    /// span reads, or reads holding several messages, are not separated.
    Chunk,
}

impl FromStr for Framing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Framing::Line),
            "chunk" => Ok(Framing::Chunk),
            other => Err(format!("unknown framing '{other}' (expected line or chunk)")),
        }
    }
}

impl Display for Framing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Framing::Line => f.write_str("line"),
            Framing::Chunk => f.write_str("chunk"),
        }
    }
}

/// Turns raw reads into messages according to a `Framing`.
///
/// In line mode a partial line is carried over to the next read, but never
/// beyond `max_line` bytes: at that size it is flushed as a message of its
/// own and the remainder of the line starts a new one.
#[derive(Debug)]
pub struct Framer {
    framing: Framing,
    pending: Vec<u8>,
    max_line: usize,
}

impl Default for Framer {
    fn default() -> Self {
        Self::new(Framing::default())
    }
}

impl Framer {
    pub fn new(framing: Framing) -> Self {
        Self::with_max_line(framing, MAX_LINE_LEN)
    }

    pub fn with_max_line(framing: Framing, max_line: usize) -> Self {
        Self {
            framing,
            pending: Vec::new(),
            max_line: max_line.max(1),
        }
    }

    /// Bytes of the current unterminated line.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Feed one read's worth of bytes, returning the complete messages in it.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        match self.framing {
            Framing::Chunk => {
                if bytes.is_empty() {
                    Vec::new()
                } else {
                    vec![String::from_utf8_lossy(bytes).into_owned()]
                }
            }
            Framing::Line => {
                let mut messages = Vec::new();
                let mut rest = bytes;

                // Only the new bytes are scanned; `pending` never holds a newline.
                while let Some(newline) = rest.iter().position(|b| *b == b'\n') {
                    self.pending.extend_from_slice(&rest[..newline]);
                    let line = std::mem::take(&mut self.pending);
                    messages.extend(decode_line(&line));
                    rest = &rest[newline + 1..];
                }

                self.pending.extend_from_slice(rest);
                if self.pending.len() >= self.max_line {
                    let line = std::mem::take(&mut self.pending);
                    messages.extend(decode_line(&line));
                }

                messages
            }
        }
    }

    /// Flush a trailing unterminated line at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.pending);
        decode_line(&rest)
    }
}

fn decode_line(line: &[u8]) -> Option<String> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(String::from_utf8_lossy(line).into_owned())
}
