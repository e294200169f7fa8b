//! Transports for the dispatcher.
//!
//! - [`HttpTransport`] - `reqwest` multipart upload with streamed progress (feature `native`)
//!
//! The browser transport (`XMLHttpRequest`) lives in the frontend crate.

#[cfg(feature = "native")]
mod http;

#[cfg(feature = "native")]
pub use http::HttpTransport;
