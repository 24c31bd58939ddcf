/*!
 * Error types for the storyreel application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a remote service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error reported inside a successful HTTP response envelope
    #[error("Service rejected the request: {0}")]
    Rejected(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while building a subtitle track
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Cue group size must be at least one word
    #[error("words per cue must be at least 1")]
    InvalidGroupSize,

    /// A word timestamp cannot be represented as milliseconds
    #[error("timestamp is not a valid non-negative number of seconds: {0}")]
    InvalidTimestamp(f64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a remote service
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Error from subtitle generation
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
