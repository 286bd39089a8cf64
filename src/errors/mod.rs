//! Error handling utilities for the mood-journal application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Most of these errors never reach the user: classification failures degrade to a
//! neutral result and storage failures are logged while the in-memory journal stays
//! authoritative. They exist so that the failure reason can be logged precisely.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur in the durable key-value store.
///
/// Every variant carries the key or path involved so that a logged failure can be
/// traced back to the snapshot it concerns.
///
/// # Examples
///
/// ```
/// use mood_journal::errors::StorageError;
/// use std::io;
///
/// let error = StorageError::Write {
///     key: "JOURNAL_ENTRIES_V1".to_string(),
///     source: io::Error::other("disk full"),
/// };
///
/// assert!(format!("{}", error).contains("JOURNAL_ENTRIES_V1"));
/// assert!(format!("{}", error).contains("disk full"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a stored value failed.
    #[error("Failed to read stored value '{key}': {source}")]
    Read {
        /// The key being read
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing a value failed.
    #[error("Failed to write stored value '{key}': {source}. Please check disk space and permissions on the data directory.")]
    Write {
        /// The key being written
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Deleting a value failed.
    #[error("Failed to delete stored value '{key}': {source}")]
    Delete {
        /// The key being deleted
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The entry collection could not be serialized.
    #[error("Failed to serialize journal entries: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The data directory is held by another process.
    #[error("Data directory is in use by another mood-journal process: {path}. Please wait for the other process to finish.")]
    Locked {
        /// The lock file that could not be acquired
        path: PathBuf,
    },

    /// Acquiring the data directory lock failed for a technical reason.
    #[error("Failed to acquire lock {path}: {source}. Please check that the data directory is accessible.")]
    LockFailed {
        /// The lock file that could not be acquired
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur when talking to the classification endpoint.
///
/// # Examples
///
/// ```
/// use mood_journal::errors::AIError;
///
/// let error = AIError::Status {
///     status: 503,
///     body: "model is loading".to_string(),
/// };
/// assert!(format!("{}", error).contains("503"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// The endpoint could not be reached, or the request timed out.
    #[error("Classification endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Classification endpoint returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The response body was not JSON.
    #[error("Invalid response from classification endpoint: {0}")]
    InvalidResponse(String),
}

/// Represents all possible errors that can occur in the mood-journal application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use mood_journal::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use mood_journal::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal entry logic (e.g., empty or oversized entry text).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors related to the durable key-value store.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Errors related to the classification endpoint.
    #[error("AI error: {0}")]
    AI(#[from] AIError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use mood_journal::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
