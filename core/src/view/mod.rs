//! View model of the upload widget.
//!
//! [`WidgetView::project`] turns an [`UploadState`] into everything the UI
//! displays, so rendering stays a dumb mapping and the labels are testable
//! without a browser.

use crate::models::{FileId, SessionStatus};
use crate::store::UploadState;

pub const HEADING: &str = "Upload Here";
pub const DROP_HINT: &str = "Drag & Drop files here or click to select";
pub const UPLOAD_LABEL: &str = "Upload";
pub const UPLOADED_LABEL: &str = "Uploaded";
pub const ADD_MORE_LABEL: &str = "Add More Files";
pub const CLEAR_LABEL: &str = "Clear Selection";

/// One line of the progress list.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressRow {
    pub id: FileId,
    pub name: String,
    pub percent: f64,
    pub uploaded: bool,
}

impl ProgressRow {
    /// `"a.txt: 25.00%"`
    pub fn label(&self) -> String {
        format!("{}: {}%", self.name, format_percent(self.percent))
    }
}

/// Everything the widget renders for a given state.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetView {
    /// Names of the selected files, in arrival order.
    pub selected: Vec<(FileId, String)>,
    pub upload_label: &'static str,
    pub upload_disabled: bool,
    pub show_add_more: bool,
    pub message: Option<String>,
    /// Empty when nothing is selected.
    pub progress: Vec<ProgressRow>,
}

impl WidgetView {
    pub fn project<P>(state: &UploadState<P>) -> Self {
        let all_uploaded = state.status() == SessionStatus::AllUploaded;

        let selected = state
            .files()
            .iter()
            .map(|f| (f.id, f.name.clone()))
            .collect();

        let progress = state
            .files()
            .iter()
            .map(|f| {
                let record = state.progress(f.id).unwrap_or_default();
                ProgressRow {
                    id: f.id,
                    name: f.name.clone(),
                    percent: record.percent,
                    uploaded: record.uploaded,
                }
            })
            .collect();

        Self {
            selected,
            upload_label: if all_uploaded { UPLOADED_LABEL } else { UPLOAD_LABEL },
            upload_disabled: all_uploaded,
            show_add_more: all_uploaded,
            message: state.message().map(str::to_string),
            progress,
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// `"3 file(s) selected"`, or the drop hint when nothing is selected.
    pub fn drop_zone_text(&self) -> String {
        if self.has_selection() {
            format!("{} file(s) selected", self.selected.len())
        } else {
            DROP_HINT.to_string()
        }
    }
}

/// Two decimal places, no unit.
pub fn format_percent(percent: f64) -> String {
    format!("{:.2}", percent)
}
