//! Events consumed by the selection store reducer.

use crate::models::{FileId, NewFile};

/// Everything that can change an [`super::UploadState`].
///
/// User intents (`FilesAdded`, `Cleared`) come from the view, the rest from
/// the dispatcher.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadEvent<P> {
    /// Files dropped or picked, in arrival order.
    FilesAdded(Vec<NewFile<P>>),
    /// "Clear Selection".
    Cleared,
    /// Upload was requested with nothing selected.
    NoFilesSelected,
    /// The dispatcher issued one request per listed file.
    UploadStarted { ids: Vec<FileId> },
    /// Transfer progress or terminal success of one file.
    ProgressUpdated {
        id: FileId,
        percent: f64,
        uploaded: bool,
    },
    /// One request failed; `error` is the display text of the transport error.
    UploadFailed { id: FileId, error: String },
    /// Every request of the batch has settled.
    UploadSettled { dispatched: usize, failed: usize },
}

impl<P> UploadEvent<P> {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UploadEvent::FilesAdded(_) => "files_added",
            UploadEvent::Cleared => "cleared",
            UploadEvent::NoFilesSelected => "no_files_selected",
            UploadEvent::UploadStarted { .. } => "upload_started",
            UploadEvent::ProgressUpdated { .. } => "progress_updated",
            UploadEvent::UploadFailed { .. } => "upload_failed",
            UploadEvent::UploadSettled { .. } => "upload_settled",
        }
    }
}
