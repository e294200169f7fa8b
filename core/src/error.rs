//! Error types for the upload pipeline.
//!
//! - [`TransportError`] - a single file's request failed
//! - [`UploadError`] - top-level dispatch errors
//!
//! Per-file transport errors never escape the dispatcher as a whole-batch
//! failure; they are collected in [`crate::dispatch::DispatchReport`] and
//! surfaced to the store as an `UploadFailed` event.

use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors raised while sending one file to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, aborted request...
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-2xx status.
    #[error("Server responded with status {status}")]
    Status { status: u16, body: String },

    /// The request could not be built (bad header, FormData failure).
    #[error("Failed to build request: {0}")]
    Request(String),
}

impl TransportError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// Upload Errors (top-level)
// =============================================================================

/// Errors returned by [`crate::dispatch::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Upload was triggered with an empty selection.
    #[error("No file chosen")]
    NoFilesSelected,

    /// A single file failed to upload.
    #[error("Upload failed: {0}")]
    Transport(#[from] TransportError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for a single transport request.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for dispatch operations.
pub type UploadResult<T> = Result<T, UploadError>;
