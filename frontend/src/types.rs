//! Browser-side aliases over the core types.
//!
//! In the browser a file payload is the `web_sys::File` handle itself; its
//! bytes are only read by the `XMLHttpRequest` when the upload starts.

use dropload::{NewFile, SelectedFile, UploadEvent, UploadState};
use web_sys::{File, FileList};

/// A selected browser file.
pub type BrowserFile = SelectedFile<File>;

/// Widget state holding browser files.
pub type WidgetState = UploadState<File>;

/// Event applied to [`WidgetState`].
pub type WidgetEvent = UploadEvent<File>;

/// Collect a picker or drop `FileList` in order.
pub fn files_from_list(list: &FileList) -> Vec<NewFile<File>> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| NewFile::new(file.name(), file.size() as u64, file))
        .collect()
}
