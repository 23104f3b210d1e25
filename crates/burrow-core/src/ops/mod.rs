//! Read-only workspace queries
//!
//! Each operation validates its options before any I/O, builds one
//! [`PathValidator`](crate::path::PathValidator) for the call, and returns a
//! typed result. Per-item failures inside a scan are skipped, never fatal.

pub mod ast_grep;
pub mod find;
pub mod glob;
pub mod ls;
pub mod read;
pub mod tree;

use std::time::{SystemTime, UNIX_EPOCH};

/// Metadata of one candidate, zeroed when `stat` failed
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Stat {
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl Stat {
    pub fn of(path: &std::path::Path) -> Option<(Self, std::fs::Metadata)> {
        let metadata = std::fs::metadata(path).ok()?;
        let stat = Self {
            size: metadata.len(),
            modified: metadata.modified().ok(),
        };
        Some((stat, metadata))
    }

    pub fn mtime(&self) -> SystemTime {
        self.modified.unwrap_or(UNIX_EPOCH)
    }
}
