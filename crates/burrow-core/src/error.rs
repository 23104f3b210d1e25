use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurrowError {
    // Caller misuse
    #[error("INVALID_PARAMETER: {0}")]
    InvalidParameter(String),

    // Sandbox errors
    #[error("PATH_REJECTED: '{requested}' is outside the workspace or excluded")]
    PathRejected { requested: String },

    #[error("NOT_FOUND: '{0}' does not exist")]
    NotFound(String),

    #[error("NOT_A_DIRECTORY: '{0}' is not a directory")]
    NotADirectory(String),

    #[error("PERMISSION_DENIED: cannot read '{0}'")]
    PermissionDenied(String),

    // Content errors
    #[error("DECODE_FAILURE: cannot decode '{path}' with encoding {encoding}")]
    DecodeFailure { path: String, encoding: String },

    #[error("READ_FAILED: cannot read '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PARSE_FAILURE: {0}")]
    ParseFailure(String),

    // Config errors
    #[error("CONFIG_INVALID: {field}: {reason}")]
    ConfigInvalid { field: String, reason: String },

    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl BurrowError {
    /// Stable machine-readable code, identical to the message prefix
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::PathRejected { .. } => "PATH_REJECTED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NotADirectory(_) => "NOT_A_DIRECTORY",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::DecodeFailure { .. } => "DECODE_FAILURE",
            Self::ReadFailed { .. } => "READ_FAILED",
            Self::ParseFailure(_) => "PARSE_FAILURE",
            Self::ConfigInvalid { .. } => "CONFIG_INVALID",
            Self::Io(_) => "IO_ERROR",
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub(crate) fn rejected(requested: impl Into<String>) -> Self {
        Self::PathRejected {
            requested: requested.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BurrowError>;

/// Rejects a bounding parameter below its inclusive lower bound of 1
pub(crate) fn require_positive(name: &str, value: usize) -> Result<usize> {
    if value < 1 {
        return Err(BurrowError::invalid(format!("{name} must be >= 1")));
    }
    Ok(value)
}
