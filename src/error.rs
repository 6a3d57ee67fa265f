//! Error types for aleph-marc

use thiserror::Error;

/// Failure classes, each mapped to a distinct process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Failure = 1,
    DecodeFailure = 2,
    Usage = 64,
}

impl ErrorCode {
    /// Exit status used by the command-line binary
    pub fn exit_code(self) -> i32 {
        self as i32
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cache I/O failed for sysid {identifier}: {source}")]
    Io {
        identifier: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Z39.50 error: {0}")]
    Z3950(String),

    #[error("Z39.50 request timed out after {0}s")]
    Z3950Timeout(u64),

    #[error("Error reading MARC21 data: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Build an I/O error tagged with the offending record identifier
    pub fn io(identifier: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            identifier: identifier.into(),
            source,
        }
    }

    /// Failure class of this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Io { .. } | AppError::Z3950(_) | AppError::Z3950Timeout(_) => {
                ErrorCode::Failure
            }
            AppError::Decode(_) => ErrorCode::DecodeFailure,
            AppError::Validation(_) | AppError::Config(_) => ErrorCode::Usage,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
