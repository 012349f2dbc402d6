use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Importance of a journal entry.
///
/// The derived ordering (`Low < Medium < High`) is the one used for threshold
/// filtering in the logger and for the per-importance buckets in the collector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown importance '{0}' (expected LOW, MEDIUM or HIGH)")]
pub struct UnknownImportance(pub String);

impl Importance {
    pub const ALL: [Importance; 3] = [Importance::Low, Importance::Medium, Importance::High];

    pub const fn as_str(self) -> &'static str {
        match self {
            Importance::Low => "LOW",
            Importance::Medium => "MEDIUM",
            Importance::High => "HIGH",
        }
    }

    /// Dense index into per-importance tables (`0..3`).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse a user supplied token, falling back to `Medium` for anything
    /// unrecognized (including an empty token).
    pub fn parse_lenient(token: &str) -> Self {
        token.parse().unwrap_or_default()
    }

    /// Derive the importance of a received line from its `[LEVEL]` tag.
    ///
    /// `[LOW]` wins over `[HIGH]` when both are present; no tag means `Medium`.
    pub fn from_tagged(text: &str) -> Self {
        if text.contains("[LOW]") {
            Importance::Low
        } else if text.contains("[HIGH]") {
            Importance::High
        } else {
            Importance::Medium
        }
    }
}

impl FromStr for Importance {
    type Err = UnknownImportance;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Importance::Low),
            "MEDIUM" => Ok(Importance::Medium),
            "HIGH" => Ok(Importance::High),
            _ => Err(UnknownImportance(s.to_string())),
        }
    }
}

impl Display for Importance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
