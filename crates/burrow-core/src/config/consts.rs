//! Default limits and values for every operation

/// Name of the optional per-workspace configuration file
pub const CONFIG_FILE: &str = "burrow.toml";

/// glob
pub mod glob {
    /// Maximum number of paths returned
    pub const MAX_RESULTS: usize = 1000;
}

/// find
pub mod find {
    /// Maximum number of matching files returned
    pub const MAX_RESULTS: usize = 100;

    /// Files searched when no pattern is given
    pub const FILE_PATTERN: &str = "**/*";
}

/// ast_grep
pub mod ast_grep {
    /// Maximum number of matches reported across all files
    pub const MAX_RESULTS: usize = 50;

    pub const FILE_PATTERN: &str = "**/*.py";

    pub const LANGUAGE: &str = "python";

    /// Width of the rule under the summary line
    pub const RULE_WIDTH: usize = 80;
}

/// tree
pub mod tree {
    /// Directory levels shown below the root
    pub const MAX_DEPTH: usize = 2;

    /// Entry lines shown below the root label
    pub const MAX_ENTRIES: usize = 200;

    /// Appended when entries were cut
    pub const TRUNCATION_MARKER: &str = "└── …";
}

/// read_files
pub mod read {
    pub const ENCODING: &str = "utf-8";

    /// Right-aligned width of line numbers (`   1: `)
    pub const LINE_NUMBER_WIDTH: usize = 4;
}
