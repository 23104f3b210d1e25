//! Directory listing

use super::Stat;
use crate::error::{BurrowError, Result};
use crate::path::PathValidator;
use crate::text::thousands;
use crate::workspace::Workspace;
use chrono::{DateTime, Local};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSort {
    #[default]
    Name,
    Mtime,
    Size,
    Type,
}

impl FromStr for ListSort {
    type Err = BurrowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "mtime" => Ok(Self::Mtime),
            "size" => Ok(Self::Size),
            "type" => Ok(Self::Type),
            other => Err(BurrowError::invalid(format!(
                "sort_by must be one of: name, mtime, size, type (got '{other}')"
            ))),
        }
    }
}

/// Ordered for the `type` sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl DirectoryEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub path: String,
    pub sort_by: ListSort,
    pub show_hidden: bool,
    pub show_details: bool,
    pub reverse: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            sort_by: ListSort::default(),
            show_hidden: false,
            show_details: false,
            reverse: false,
        }
    }
}

/// Result of `ls`: bare names, or the details report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Names(Vec<String>),
    Details(String),
}

/// Lists the immediate children of `options.path`
///
/// An invalid or unreadable directory is not an error: it yields an empty
/// list, or a one-line message in details mode.
pub fn list(workspace: &Workspace, options: &ListOptions) -> Listing {
    let validator = workspace.validator();
    let dir = match validator.validate(&options.path) {
        Ok(dir) => dir,
        Err(_) => return failure(options, format!("Invalid path: {}", options.path)),
    };

    let mut entries = match read_entries(&validator, &dir, options.show_hidden) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %options.path, "cannot read directory: {}", e);
            let reason = if e.kind() == std::io::ErrorKind::PermissionDenied {
                "Permission denied"
            } else {
                "Cannot read directory"
            };
            return failure(options, format!("{reason}: {}", options.path));
        }
    };
    sort_entries(&mut entries, options.sort_by, options.reverse);

    if options.show_details {
        Listing::Details(render_details(&options.path, &entries))
    } else {
        Listing::Names(entries.into_iter().map(|e| e.name).collect())
    }
}

fn failure(options: &ListOptions, message: String) -> Listing {
    if options.show_details {
        Listing::Details(message)
    } else {
        Listing::Names(Vec::new())
    }
}

/// Validated children of `dir`, unsorted
///
/// An entry whose metadata cannot be read after it passed validation (it
/// raced with a delete) is kept as [`EntryKind::Unknown`] with no size or
/// timestamp.
pub fn read_entries(
    validator: &PathValidator,
    dir: &Path,
    show_hidden: bool,
) -> std::io::Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let Ok(entry) = entry else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if !validator.accepts(&path) {
            continue;
        }

        let entry = match Stat::of(&path) {
            Some((stat, metadata)) => DirectoryEntry {
                name,
                path,
                kind: if metadata.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
                size: stat.size,
                modified: stat.modified,
            },
            // Removed or made unreadable after validation
            None => DirectoryEntry {
                name,
                path,
                kind: EntryKind::Unknown,
                size: 0,
                modified: None,
            },
        };
        entries.push(entry);
    }
    Ok(entries)
}

/// Sorts in place
///
/// `size` keeps directories first in both directions and `reverse` only
/// flips the size order; every other key reverses the whole list.
pub fn sort_entries(entries: &mut [DirectoryEntry], sort_by: ListSort, reverse: bool) {
    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    match sort_by {
        ListSort::Name => entries.sort_by_key(|e| !e.is_dir()),
        ListSort::Mtime => entries.sort_by_key(|e| e.modified.unwrap_or(UNIX_EPOCH)),
        ListSort::Size if reverse => entries.sort_by_key(|e| (!e.is_dir(), Reverse(e.size))),
        ListSort::Size => entries.sort_by_key(|e| (!e.is_dir(), e.size)),
        ListSort::Type => entries.sort_by_key(|e| e.kind),
    }
    if reverse && sort_by != ListSort::Size {
        entries.reverse();
    }
}

fn render_details(path: &str, entries: &[DirectoryEntry]) -> String {
    let mut lines = vec![
        format!("Directory: {path}"),
        format!("Total entries: {}", entries.len()),
        String::new(),
    ];
    for entry in entries {
        let prefix = match entry.kind {
            EntryKind::Directory => "[DIR] ",
            EntryKind::File => "[FILE]",
            EntryKind::Unknown => "[UNK] ",
        };
        let size = if entry.is_dir() {
            String::new()
        } else {
            format!("{} bytes", thousands(entry.size))
        };
        let modified = entry
            .modified
            .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        lines.push(format!("{prefix}{:<30} {size:<15} {modified}", entry.name));
    }
    lines.join("\n")
}
