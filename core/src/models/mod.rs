//! Domain models for the upload widget.
//!
//! - [`FileId`] - synthetic key assigned by the store
//! - [`NewFile`] - a file handed over by the picker or a drop, not yet keyed
//! - [`SelectedFile`] - a keyed file in the selection
//! - [`ProgressRecord`] - per-file upload progress
//! - [`SessionStatus`] - aggregate upload status
//!
//! Files are generic over their payload `P`: raw bytes (`Bytes`) for the
//! native transport, a `web_sys::File` handle in the browser.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique key of a selected file.
///
/// File names are display-only: two files called `a.txt` get two ids and two
/// progress records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Files
// =============================================================================

/// File produced by a drop or a picker change, before the store keys it.
#[derive(Clone, Debug, PartialEq)]
pub struct NewFile<P> {
    pub name: String,
    pub size: u64,
    pub payload: P,
}

impl<P> NewFile<P> {
    pub fn new(name: impl Into<String>, size: u64, payload: P) -> Self {
        Self {
            name: name.into(),
            size,
            payload,
        }
    }
}

impl NewFile<Bytes> {
    /// In-memory file; size is the byte length.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let payload: Bytes = bytes.into();
        Self::new(name, payload.len() as u64, payload)
    }
}

/// A file in the current selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile<P> {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    pub payload: P,
}

impl<P> SelectedFile<P> {
    pub(crate) fn from_new(id: FileId, file: NewFile<P>) -> Self {
        Self {
            id,
            name: file.name,
            size: file.size,
            payload: file.payload,
        }
    }
}

// =============================================================================
// Progress
// =============================================================================

/// Upload progress of one file.
///
/// `uploaded` is the terminal-success flag and implies `percent == 100.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// 0.0 to 100.0
    pub percent: f64,
    pub uploaded: bool,
}

impl ProgressRecord {
    pub const PENDING: ProgressRecord = ProgressRecord {
        percent: 0.0,
        uploaded: false,
    };

    pub const DONE: ProgressRecord = ProgressRecord {
        percent: 100.0,
        uploaded: true,
    };

    /// Build a record, clamping `percent` into range.
    ///
    /// Returns `None` for NaN.
    pub fn new(percent: f64, uploaded: bool) -> Option<Self> {
        if uploaded {
            return Some(Self::DONE);
        }
        if percent.is_nan() {
            return None;
        }
        Some(Self {
            percent: percent.clamp(0.0, 100.0),
            uploaded: false,
        })
    }
}

/// Percentage of `sent` over `total`; zero-length transfers report 0.
pub fn percent_of(sent: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    sent.min(total) as f64 / total as f64 * 100.0
}

// =============================================================================
// Session
// =============================================================================

/// Aggregate status of the widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Idle,
    Uploading,
    AllUploaded,
}
