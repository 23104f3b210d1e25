//! Sandboxed, read-only workspace inspection
//!
//! Every operation takes an explicit [`Workspace`] and never reads the
//! process working directory. Paths are confined to the workspace root,
//! `.git` is always hidden and nested `.gitignore` rules are honored.

pub mod config;
pub mod error;
pub mod ignore_rules;
pub mod ops;
pub mod path;
pub mod syntax;
pub mod text;
pub mod workspace;

// Re-export commonly used types
pub use error::{BurrowError, Result};
pub use workspace::Workspace;
