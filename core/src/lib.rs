//! # Dropload - multi-file upload with per-file progress
//!
//! Platform-independent core of the Dropload upload widget: the selection
//! store, the concurrent upload dispatcher and the view model. The Leptos
//! frontend renders it in the browser; the `native` feature adds a `reqwest`
//! transport for use outside of it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  FilesAdded  ┌─────────────┐  project  ┌─────────────┐
//! │ Drop / Pick │─────────────▶│ UploadState │──────────▶│ WidgetView  │
//! └─────────────┘   Cleared    └─────────────┘           └─────────────┘
//!                                 ▲      │ files
//!                   UploadEvent   │      ▼
//!                              ┌─────────────┐  send   ┌─────────────┐
//!                              │  dispatch   │────────▶│  Transport  │ x N
//!                              └─────────────┘         └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::cell::RefCell;
//! use dropload::{dispatch, HttpTransport, NewFile, UploadConfig, UploadState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = RefCell::new(UploadState::default());
//!     state.borrow_mut().add_files(vec![NewFile::from_bytes("a.txt", b"hello".to_vec())]);
//!
//!     let files = state.borrow().files().to_vec();
//!     let transport = HttpTransport::new(UploadConfig::default());
//!     let emit = |event| state.borrow_mut().apply(event);
//!     dispatch(&files, &transport, &emit).await.unwrap();
//!
//!     println!("{}", state.borrow().message().unwrap_or_default());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Transport and dispatch errors
//! - [`config`] - Endpoint, header and message constants
//! - [`models`] - FileId, SelectedFile, ProgressRecord, SessionStatus
//! - [`store`] - Selection store and its reducer
//! - [`dispatch`] - Concurrent upload of a selection
//! - [`transport`] - HTTP transport (feature `native`)
//! - [`view`] - View model for rendering

// Core modules
pub mod error;
pub mod config;
pub mod models;

// State
pub mod store;

// Upload
pub mod dispatch;
pub mod transport;

// Rendering
pub mod view;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{TransportError, TransportResult, UploadError, UploadResult};

pub use config::{SettlePolicy, UploadConfig};

pub use models::{percent_of, FileId, NewFile, ProgressRecord, SelectedFile, SessionStatus};

pub use store::{UploadEvent, UploadState};

pub use dispatch::{dispatch, DispatchReport, ProgressSink, Transport};

#[cfg(feature = "native")]
pub use transport::HttpTransport;

pub use view::{format_percent, ProgressRow, WidgetView};
