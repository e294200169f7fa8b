//! Upload configuration.
//!
//! The widget has no config file and reads no environment; these are
//! hardcoded defaults that embedders can override through [`UploadConfig`].

use serde::{Deserialize, Serialize};

/// Default upload endpoint.
pub const UPLOAD_ENDPOINT: &str = "http://httpbin.org/post";

/// Multipart field carrying the file content.
pub const FILE_FIELD: &str = "file";

/// Extra header sent with every upload request.
pub const CUSTOM_HEADER_NAME: &str = "Custom-Header";

/// Value of [`CUSTOM_HEADER_NAME`].
pub const CUSTOM_HEADER_VALUE: &str = "value";

/// Size of the body chunks streamed by the native transport (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

// =============================================================================
// Status messages
// =============================================================================

pub const MSG_NO_FILE: &str = "No file chosen";
pub const MSG_UPLOADING: &str = "Uploading...";
pub const MSG_UPLOAD_FAILED: &str = "Upload failed";
pub const MSG_FILE_UPLOADED: &str = "File uploaded successfully";
pub const MSG_ALL_UPLOADED: &str = "All files uploaded successfully";

/// How the aggregate message is chosen once every request has settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlePolicy {
    /// Success message regardless of individual failures.
    #[default]
    AlwaysSuccess,
    /// Mention failures when at least one request failed.
    ReportFailures,
}

impl SettlePolicy {
    /// Message shown after `dispatched` requests settled, `failed` of them with an error.
    pub fn message(self, dispatched: usize, failed: usize) -> String {
        let success = || {
            if dispatched == 1 {
                MSG_FILE_UPLOADED.to_string()
            } else {
                MSG_ALL_UPLOADED.to_string()
            }
        };

        match self {
            SettlePolicy::AlwaysSuccess => success(),
            SettlePolicy::ReportFailures => match failed {
                0 => success(),
                n if n >= dispatched => MSG_UPLOAD_FAILED.to_string(),
                n => format!("{} of {} files failed to upload", n, dispatched),
            },
        }
    }
}

/// Upload endpoint and request shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    pub endpoint: String,
    pub field_name: String,
    pub header_name: String,
    pub header_value: String,
    pub settle_policy: SettlePolicy,
    /// Only used by the native transport.
    pub chunk_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: UPLOAD_ENDPOINT.to_string(),
            field_name: FILE_FIELD.to_string(),
            header_name: CUSTOM_HEADER_NAME.to_string(),
            header_value: CUSTOM_HEADER_VALUE.to_string(),
            settle_policy: SettlePolicy::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl UploadConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_name = name.into();
        self.header_value = value.into();
        self
    }

    pub fn with_settle_policy(mut self, policy: SettlePolicy) -> Self {
        self.settle_policy = policy;
        self
    }

    /// Zero is bumped to one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}
