//! CLI command implementations

pub mod ast_grep;
pub mod find;
pub mod glob;
pub mod ls;
pub mod mcp;
pub mod pwd;
pub mod read;
pub mod tree;
