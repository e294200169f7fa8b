//! Browser services.
//!
//! # Services
//!
//! - [`upload`] - `XMLHttpRequest` transport with upload progress

pub mod upload;

pub use upload::*;
