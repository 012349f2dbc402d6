use std::fs;
use std::path::Path;

#[allow(dead_code)]
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Strip the leading `[YYYY-MM-DD HH:MM:SS] ` stamp from a journal line.
#[allow(dead_code)]
pub fn without_timestamp(line: &str) -> &str {
    line.split_once("] ").map(|(_, rest)| rest).unwrap_or(line)
}
