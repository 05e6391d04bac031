//! Error types for task helper operations.

use thiserror::Error;

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Media types and filenames disagree
    E001MediaTypeMismatch,
    /// E002: Requested media store does not exist
    E002MissingStore,
    /// E003: Media store output could not be written
    E003StoreWrite,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E001MediaTypeMismatch => "E001",
            Self::E002MissingStore => "E002",
            Self::E003StoreWrite => "E003",
        }
    }
}

/// Errors raised by the task helpers themselves
///
/// Failures from an ingester are never converted into this type; they reach
/// the caller unchanged.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("[{code}] Provided media types and TSV filenames don't match: {message}")]
    MediaTypeMismatch { code: &'static str, message: String },

    #[error("[{code}] Media store unavailable: {message}")]
    MissingStore { code: &'static str, message: String },

    #[error("[{code}] Failed to write media store output '{path}': {source}")]
    StoreWrite {
        code: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FactoryError {
    pub fn media_type_mismatch(media_types: usize, filenames: usize) -> Self {
        Self::MediaTypeMismatch {
            code: ErrorCode::E001MediaTypeMismatch.as_str(),
            message: format!("{} media types, {} filenames", media_types, filenames),
        }
    }

    pub fn missing_store(message: String) -> Self {
        Self::MissingStore {
            code: ErrorCode::E002MissingStore.as_str(),
            message,
        }
    }

    pub fn store_write(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::StoreWrite {
            code: ErrorCode::E003StoreWrite.as_str(),
            path: path.display().to_string(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MediaTypeMismatch { .. } => ErrorCode::E001MediaTypeMismatch,
            Self::MissingStore { .. } => ErrorCode::E002MissingStore,
            Self::StoreWrite { .. } => ErrorCode::E003StoreWrite,
        }
    }
}

/// Result type alias for FactoryError
pub type Result<T> = std::result::Result<T, FactoryError>;
