/*!
 * Tests for error types and conversions
 */

use storyreel::errors::{AppError, ServiceError, SubtitleError};

#[test]
fn test_serviceError_requestFailed_shouldDisplayCorrectly() {
    let error = ServiceError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_serviceError_parseError_shouldDisplayCorrectly() {
    let error = ServiceError::ParseError("Invalid JSON".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Failed to parse API response"));
    assert!(display.contains("Invalid JSON"));
}

#[test]
fn test_serviceError_apiError_shouldDisplayStatusAndMessage() {
    let error = ServiceError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_serviceError_rejected_shouldDisplayCorrectly() {
    let error = ServiceError::Rejected("draft not found".to_string());
    let display = format!("{}", error);
    assert!(display.contains("rejected"));
    assert!(display.contains("draft not found"));
}

#[test]
fn test_serviceError_connectionError_shouldDisplayCorrectly() {
    let error = ServiceError::ConnectionError("Host unreachable".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Connection error"));
    assert!(display.contains("Host unreachable"));
}

#[test]
fn test_subtitleError_invalidTimestamp_shouldIncludeValue() {
    let error = SubtitleError::InvalidTimestamp(-3.5);
    let display = format!("{}", error);
    assert!(display.contains("-3.5"));
}

#[test]
fn test_appError_fromServiceError_shouldWrapWithPrefix() {
    let error: AppError = ServiceError::RequestFailed("boom".to_string()).into();
    let display = format!("{}", error);
    assert!(display.starts_with("Service error:"));
    assert!(display.contains("boom"));
}

#[test]
fn test_appError_fromSubtitleError_shouldWrapWithPrefix() {
    let error: AppError = SubtitleError::InvalidGroupSize.into();
    let display = format!("{}", error);
    assert!(display.starts_with("Subtitle error:"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
    let error: AppError = io_error.into();
    let display = format!("{}", error);
    assert!(display.starts_with("File error:"));
    assert!(display.contains("missing file"));
}
