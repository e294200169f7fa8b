//! Application configuration.
//!
//! Centralized configuration for the Dropload frontend. Everything is
//! hardcoded: the widget reads no config file and no environment.

use dropload::{SettlePolicy, UploadConfig};

/// Upload endpoint.
pub const UPLOAD_URL: &str = dropload::config::UPLOAD_ENDPOINT;

/// Document title.
pub const APP_TITLE: &str = "Dropload";

/// Aggregate message once all uploads settled.
///
/// `AlwaysSuccess` reports success even when some files failed.
pub const SETTLE_POLICY: SettlePolicy = SettlePolicy::AlwaysSuccess;

/// Maximum log level sent to the browser console.
pub const LOG_LEVEL: log::Level = log::Level::Debug;

/// Request shape used by the widget.
pub fn upload_config() -> UploadConfig {
    UploadConfig::default()
        .with_endpoint(UPLOAD_URL)
        .with_settle_policy(SETTLE_POLICY)
}
