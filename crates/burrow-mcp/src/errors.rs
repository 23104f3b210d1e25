use burrow_core::error::BurrowError;
use rmcp::ErrorData;
use serde_json::json;
use std::fmt::Display;

// 標準エラーコード定数 (BurrowError::code と一致)
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const PATH_REJECTED: &str = "PATH_REJECTED";
pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Returned for every sandbox violation; never mentions the requested path
pub const SANDBOX_ADVISORY: &str = "Error: I encountered an error while trying to access a file \
or directory. For security reasons, I can only access files within the current workspace \
directory. Please ensure the path you're requesting is within this directory.";

pub fn invalid_params(message: impl Into<String>) -> ErrorData {
    ErrorData::invalid_params(message.into(), Some(json!({ "code": INVALID_PARAMETER })))
}

pub fn internal_error(message: impl Into<String>) -> ErrorData {
    error_with_code(INTERNAL_ERROR, message)
}

pub fn error_with_code(code: &str, message: impl Into<String>) -> ErrorData {
    ErrorData::internal_error(
        message.into(),
        Some(json!({
            "code": code
        })),
    )
}

pub fn from_core_error(error: BurrowError) -> ErrorData {
    match error {
        BurrowError::InvalidParameter(message) => invalid_params(message),
        BurrowError::PathRejected { .. } | BurrowError::PermissionDenied(_) => {
            tracing::debug!(code = error.code(), "sandbox violation: {}", error);
            error_with_code(error.code(), SANDBOX_ADVISORY)
        }
        _ => error_with_code(error.code(), error.to_string()),
    }
}

pub fn from_display(error: impl Display) -> ErrorData {
    internal_error(format!("{}", error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_does_not_echo_path() {
        let error = from_core_error(BurrowError::PathRejected {
            requested: "../../etc/shadow".to_string(),
        });
        assert_eq!(error.message, SANDBOX_ADVISORY);
        assert!(!error.message.contains("shadow"));
        assert_eq!(error.data.unwrap()["code"], PATH_REJECTED);
    }

    #[test]
    fn test_invalid_parameter_is_specific() {
        let error = from_core_error(BurrowError::InvalidParameter(
            "max_results must be >= 1".to_string(),
        ));
        assert_eq!(error.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert_eq!(error.message, "max_results must be >= 1");
    }

    #[test]
    fn test_other_errors_keep_their_code() {
        let error = from_core_error(BurrowError::NotADirectory("a.txt".to_string()));
        assert_eq!(error.data.unwrap()["code"], "NOT_A_DIRECTORY");
    }
}
