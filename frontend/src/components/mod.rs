//! UI Components for the Dropload widget.
//!
//! - [`UploadWidget`] - Drop zone, file picker, upload and clear buttons
//! - [`ProgressList`] - Per-file upload progress

mod upload;
mod progress;

pub use upload::*;
pub use progress::*;
