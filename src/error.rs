//! Error types for the check-in pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CheckinError`] - Registration flow errors (validation, duplicates)
//! - [`StoreError`] - Record store read/write errors
//! - [`ExportError`] - CSV export errors
//! - [`PurgeError`] - Batched purge errors
//! - [`ServerError`] - Top-level HTTP errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::collections::BTreeMap;
use thiserror::Error;

/// Per-field validation failures, keyed by form field name
/// (`firstName`, `email`, ...). Ordered so responses are stable.
pub type FieldErrors = BTreeMap<String, String>;

// =============================================================================
// Registration Errors
// =============================================================================

/// Errors from the registration flow (validate, dedup, insert).
///
/// The duplicate variants carry the exact user-facing messages; email is
/// always checked before phone, so a submission that collides on both
/// reports the email conflict.
#[derive(Debug, Error)]
pub enum CheckinError {
    /// One or more fields failed validation.
    #[error("Validation failed for {} field(s)", .0.len())]
    Invalid(FieldErrors),

    /// An existing record already uses this email (case-insensitive).
    #[error("You have already registered for this event.")]
    DuplicateEmail,

    /// An existing record already uses this phone number (verbatim match).
    #[error("This phone number is already registered.")]
    DuplicatePhone,

    /// The store rejected the write.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from the attendance record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write the data directory.
    #[error("Store IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Persisted records could not be decoded.
    #[error("Corrupt record data: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The store refused the request (e.g. delete batch over the ceiling).
    #[error("Write rejected: {0}")]
    WriteRejected(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors during CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The filtered subset is empty; no file is produced.
    #[error("No records matching the current filters")]
    NoMatchingRecords,

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Buffer write failed.
    #[error("Export IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Purge Errors
// =============================================================================

/// Errors during the batched purge operation.
#[derive(Debug, Error)]
pub enum PurgeError {
    /// Confirmation token did not match the literal "DELETE".
    #[error("Purge not confirmed: type DELETE to confirm")]
    NotConfirmed,

    /// Another purge is still running.
    #[error("A purge is already in progress")]
    AlreadyRunning,

    /// A delete batch failed partway through. Records deleted by prior
    /// batches stay deleted; there is no rollback and no automatic retry.
    #[error("Purge failed after deleting {deleted} record(s): {source}")]
    BatchFailed { deleted: usize, source: StoreError },
}

// =============================================================================
// Server Errors (top-level)
// =============================================================================

/// Top-level HTTP server errors.
///
/// This wraps all lower-level errors so handlers can use `?` and map the
/// result onto a status code in one place.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Registration error.
    #[error("Check-in error: {0}")]
    Checkin(#[from] CheckinError),

    /// Export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Purge error.
    #[error("Purge error: {0}")]
    Purge(#[from] PurgeError),

    /// Store error outside the registration flow.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for registration operations.
pub type CheckinResult<T> = Result<T, CheckinError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for purge operations.
pub type PurgeResult<T> = Result<T, PurgeError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // StoreError -> CheckinError
        let store_err = StoreError::WriteRejected("batch too large".into());
        let checkin_err: CheckinError = store_err.into();
        assert!(checkin_err.to_string().contains("batch too large"));

        // CheckinError -> ServerError
        let server_err: ServerError = CheckinError::DuplicateEmail.into();
        assert!(server_err.to_string().contains("already registered"));
    }

    #[test]
    fn test_duplicate_messages_are_user_facing() {
        assert_eq!(
            CheckinError::DuplicateEmail.to_string(),
            "You have already registered for this event."
        );
        assert_eq!(
            CheckinError::DuplicatePhone.to_string(),
            "This phone number is already registered."
        );
    }

    #[test]
    fn test_batch_failed_reports_progress() {
        let err = PurgeError::BatchFailed {
            deleted: 500,
            source: StoreError::WriteRejected("backend unavailable".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("backend unavailable"));
    }
}
