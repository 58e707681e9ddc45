//! Error types for digit-identifier

use serde::Serialize;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Please upload an image file (got {0})")]
    InvalidType(String),

    #[error("Please upload an image first")]
    NoImage,

    #[error("API key not configured. Please set {0} in your environment.")]
    MissingCredential(String),

    #[error("Error processing image: {0}")]
    Service(String),

    #[error("Could not identify a handwritten number")]
    Unrecognized,
}

/// Coarse classification of an [`Error`], used by the UI and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidType,
    NoImage,
    MissingCredential,
    ServiceError,
    Unrecognized,
    FileNotFound,
    Io,
    Json,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Json(_) => ErrorKind::Json,
            Error::Config(_) => ErrorKind::Config,
            Error::FileNotFound(_) => ErrorKind::FileNotFound,
            Error::InvalidType(_) => ErrorKind::InvalidType,
            Error::NoImage => ErrorKind::NoImage,
            Error::MissingCredential(_) => ErrorKind::MissingCredential,
            Error::Service(_) => ErrorKind::ServiceError,
            Error::Unrecognized => ErrorKind::Unrecognized,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_keeps_underlying_message() {
        let err = Error::Service("connection refused".to_string());
        assert_eq!(err.kind(), ErrorKind::ServiceError);
        assert_eq!(err.to_string(), "Error processing image: connection refused");
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let err = Error::MissingCredential("GEMINI_API_KEY".to_string());
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
