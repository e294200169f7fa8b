//! Selection store.
//!
//! Holds the ordered file selection, one [`ProgressRecord`] per file, and the
//! aggregate [`SessionStatus`] with its message. All three are kept in a single
//! [`UploadState`] snapshot that only changes through [`UploadEvent`]s, so the
//! whole widget state machine can be driven without a UI:
//!
//! ```text
//!            FilesAdded / Cleared
//!   ┌──────┐ ───────────────────▶ ┌──────┐
//!   │ Idle │     UploadStarted     │      │   UploadSettled   ┌─────────────┐
//!   │      │ ────────────────────▶ │Uploa-│ ────────────────▶ │ AllUploaded │
//!   └──────┘ ◀──── FilesAdded ──── │ding  │                   └─────────────┘
//!      ▲            Cleared        └──────┘                          │
//!      └──────────────────── FilesAdded / Cleared ──────────────────┘
//! ```

mod event;

pub use event::UploadEvent;

use std::collections::HashMap;

use crate::config::{SettlePolicy, MSG_NO_FILE, MSG_UPLOADING, MSG_UPLOAD_FAILED};
use crate::models::{FileId, NewFile, ProgressRecord, SelectedFile, SessionStatus};

/// Snapshot of the widget state.
#[derive(Clone, Debug)]
pub struct UploadState<P> {
    files: Vec<SelectedFile<P>>,
    progress: HashMap<FileId, ProgressRecord>,
    status: SessionStatus,
    message: Option<String>,
    settle_policy: SettlePolicy,
    /// Outstanding requests per file, across overlapping batches.
    in_flight: HashMap<FileId, usize>,
    /// Never reset, so ids stay unique across clears.
    next_id: u64,
}

impl<P> Default for UploadState<P> {
    fn default() -> Self {
        Self::new(SettlePolicy::default())
    }
}

impl<P> UploadState<P> {
    pub fn new(settle_policy: SettlePolicy) -> Self {
        Self {
            files: Vec::new(),
            progress: HashMap::new(),
            status: SessionStatus::Idle,
            message: None,
            settle_policy,
            in_flight: HashMap::new(),
            next_id: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Selected files in arrival order.
    pub fn files(&self) -> &[SelectedFile<P>] {
        &self.files
    }

    pub fn progress(&self, id: FileId) -> Option<ProgressRecord> {
        self.progress.get(&id).copied()
    }

    /// Number of progress records (equals `len()` outside of bugs).
    pub fn progress_len(&self) -> usize {
        self.progress.len()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn settle_policy(&self) -> SettlePolicy {
        self.settle_policy
    }

    /// Requests started and not yet settled.
    pub fn in_flight(&self) -> usize {
        self.in_flight.values().sum()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Append files after the current selection and give each a fresh id.
    ///
    /// Resets the session to `Idle` and drops the message, unless `new_files`
    /// is empty, in which case nothing changes.
    pub fn add_files(&mut self, new_files: Vec<NewFile<P>>) -> Vec<FileId> {
        if new_files.is_empty() {
            return Vec::new();
        }

        let mut ids = Vec::with_capacity(new_files.len());
        for file in new_files {
            let id = FileId(self.next_id);
            self.next_id += 1;
            self.progress.insert(id, ProgressRecord::PENDING);
            self.files.push(SelectedFile::from_new(id, file));
            ids.push(id);
        }

        self.status = SessionStatus::Idle;
        self.message = None;
        log::debug!("{} file(s) added, {} selected", ids.len(), self.files.len());
        ids
    }

    /// Drop the whole selection and reset the session.
    pub fn clear(&mut self) {
        self.files.clear();
        self.progress.clear();
        self.in_flight.clear();
        self.status = SessionStatus::Idle;
        self.message = None;
    }

    /// Overwrite the record of `id`.
    ///
    /// Unknown ids are ignored: progress of an in-flight request may arrive
    /// after the selection was cleared.
    pub fn update_progress(&mut self, id: FileId, percent: f64, uploaded: bool) {
        let Some(slot) = self.progress.get_mut(&id) else {
            log::trace!("progress for unknown file {} ignored", id);
            return;
        };
        match ProgressRecord::new(percent, uploaded) {
            Some(record) => *slot = record,
            None => log::warn!("invalid progress {} for file {} ignored", percent, id),
        }
    }

    /// Count one more request for `id`; returns `false` if one was already running.
    fn start_request(&mut self, id: FileId) -> bool {
        let count = self.in_flight.entry(id).or_insert(0);
        *count += 1;
        *count == 1
    }

    /// Forget one request for `id`; returns `false` if none was known.
    fn finish_request(&mut self, id: FileId) -> bool {
        match self.in_flight.get_mut(&id) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.in_flight.remove(&id);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Reducer
    // =========================================================================

    /// Apply one event in place.
    pub fn apply(&mut self, event: UploadEvent<P>) {
        match event {
            UploadEvent::FilesAdded(files) => {
                self.add_files(files);
            }
            UploadEvent::Cleared => self.clear(),
            UploadEvent::NoFilesSelected => {
                self.message = Some(MSG_NO_FILE.to_string());
            }
            UploadEvent::UploadStarted { ids } => {
                for id in ids {
                    if !self.progress.contains_key(&id) {
                        continue;
                    }
                    // A file already uploading keeps its progress
                    if self.start_request(id) {
                        self.progress.insert(id, ProgressRecord::PENDING);
                    }
                }
                self.status = SessionStatus::Uploading;
                self.message = Some(MSG_UPLOADING.to_string());
            }
            UploadEvent::ProgressUpdated {
                id,
                percent,
                uploaded,
            } => {
                if uploaded {
                    self.finish_request(id);
                } else if self.in_flight.contains_key(&id) {
                    // Overlapping requests for one file must not move it backwards
                    let current = self.progress(id).unwrap_or_default();
                    if current.uploaded || percent < current.percent {
                        return;
                    }
                }
                self.update_progress(id, percent, uploaded);
            }
            UploadEvent::UploadFailed { id, .. } => {
                let known = self.finish_request(id);
                if known && self.status == SessionStatus::Uploading {
                    self.message = Some(MSG_UPLOAD_FAILED.to_string());
                }
            }
            UploadEvent::UploadSettled { dispatched, failed } => {
                // A clear or a new selection during the upload wins over the late settle.
                if self.status != SessionStatus::Uploading {
                    log::debug!("settle of {} request(s) ignored, session was reset", dispatched);
                    return;
                }
                // Another batch is still running; its own settle finishes the session
                if !self.in_flight.is_empty() {
                    log::debug!(
                        "settle of {} request(s) deferred, {} still in flight",
                        dispatched,
                        self.in_flight()
                    );
                    return;
                }
                self.status = SessionStatus::AllUploaded;
                self.message = Some(self.settle_policy.message(dispatched, failed));
            }
        }
    }

    /// Pure form of [`apply`](Self::apply).
    pub fn reduce(mut self, event: UploadEvent<P>) -> Self {
        self.apply(event);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MSG_ALL_UPLOADED, MSG_FILE_UPLOADED};

    fn batch(names: &[&str]) -> Vec<NewFile<()>> {
        names.iter().map(|n| NewFile::new(*n, 10, ())).collect()
    }

    fn done(id: u64) -> UploadEvent<()> {
        UploadEvent::ProgressUpdated {
            id: FileId(id),
            percent: 100.0,
            uploaded: true,
        }
    }

    fn failed(id: u64) -> UploadEvent<()> {
        UploadEvent::UploadFailed {
            id: FileId(id),
            error: "boom".into(),
        }
    }

    fn names(state: &UploadState<()>) -> Vec<&str> {
        state.files().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_add_files_appends_in_arrival_order() {
        let mut state = UploadState::default();
        state.add_files(batch(&["a.txt", "b.txt"]));
        state.add_files(batch(&["c.txt"]));
        state.add_files(batch(&["d.txt", "e.txt", "f.txt"]));

        assert_eq!(state.len(), 6);
        assert_eq!(names(&state), ["a.txt", "b.txt", "c.txt", "d.txt", "e.txt", "f.txt"]);
        assert_eq!(state.progress_len(), 6);
        for file in state.files() {
            assert_eq!(state.progress(file.id), Some(ProgressRecord::PENDING));
        }
    }

    #[test]
    fn test_add_files_resets_session() {
        let mut state = UploadState::default();
        let ids = state.add_files(batch(&["a.txt"]));
        state.apply(UploadEvent::UploadStarted { ids: ids.clone() });
        state.apply(UploadEvent::ProgressUpdated {
            id: ids[0],
            percent: 100.0,
            uploaded: true,
        });
        state.apply(UploadEvent::UploadSettled { dispatched: 1, failed: 0 });
        assert_eq!(state.status(), SessionStatus::AllUploaded);

        state.add_files(batch(&["b.txt"]));
        assert_eq!(state.status(), SessionStatus::Idle);
        assert_eq!(state.message(), None);
    }

    #[test]
    fn test_add_empty_batch_changes_nothing() {
        let mut state = UploadState::<()>::default();
        state.apply(UploadEvent::NoFilesSelected);

        let ids = state.add_files(Vec::new());
        assert!(ids.is_empty());
        assert!(state.is_empty());
        assert_eq!(state.message(), Some(MSG_NO_FILE));
    }

    #[test]
    fn test_same_name_gets_distinct_records() {
        let mut state = UploadState::default();
        let first = state.add_files(batch(&["a.txt"]));
        let second = state.add_files(batch(&["a.txt"]));
        assert_ne!(first[0], second[0]);

        state.update_progress(first[0], 40.0, false);
        assert_eq!(state.progress(first[0]).unwrap().percent, 40.0);
        assert_eq!(state.progress(second[0]), Some(ProgressRecord::PENDING));
    }

    #[test]
    fn test_clear_from_any_state() {
        let mut state = UploadState::default();
        let ids = state.add_files(batch(&["a.txt", "b.txt"]));
        state.apply(UploadEvent::UploadStarted { ids: ids.clone() });
        state.apply(UploadEvent::UploadFailed {
            id: ids[0],
            error: "boom".into(),
        });

        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.progress_len(), 0);
        assert_eq!(state.status(), SessionStatus::Idle);
        assert_eq!(state.message(), None);

        // Still a no-op on an empty store
        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut state = UploadState::default();
        let before = state.add_files(batch(&["a.txt"]));
        state.clear();
        let after = state.add_files(batch(&["a.txt"]));
        assert_ne!(before, after);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut state = UploadState::default();
        let ids = state.add_files(batch(&["a.txt"]));
        state.clear();

        state.update_progress(ids[0], 50.0, false);
        state.apply(UploadEvent::UploadFailed {
            id: ids[0],
            error: "late".into(),
        });
        assert_eq!(state.progress_len(), 0);
        assert_eq!(state.message(), None);
    }

    #[test]
    fn test_uploaded_forces_full_percent() {
        let mut state = UploadState::default();
        let ids = state.add_files(batch(&["a.txt"]));
        state.update_progress(ids[0], 12.5, true);
        assert_eq!(state.progress(ids[0]), Some(ProgressRecord::DONE));
    }

    #[test]
    fn test_upload_started_resets_records() {
        let mut state = UploadState::default();
        let ids = state.add_files(batch(&["a.txt"]));
        state.update_progress(ids[0], 60.0, false);

        state.apply(UploadEvent::UploadStarted { ids: ids.clone() });
        assert_eq!(state.progress(ids[0]), Some(ProgressRecord::PENDING));
        assert_eq!(state.status(), SessionStatus::Uploading);
        assert_eq!(state.message(), Some(MSG_UPLOADING));
    }

    #[test]
    fn test_settle_messages() {
        let single = UploadState::default()
            .reduce(UploadEvent::FilesAdded(batch(&["a.txt"])))
            .reduce(UploadEvent::UploadStarted { ids: vec![FileId(0)] })
            .reduce(done(0))
            .reduce(UploadEvent::UploadSettled { dispatched: 1, failed: 0 });
        assert_eq!(single.message(), Some(MSG_FILE_UPLOADED));
        assert_eq!(single.status(), SessionStatus::AllUploaded);

        let many = UploadState::default()
            .reduce(UploadEvent::FilesAdded(batch(&["a.txt", "b.txt"])))
            .reduce(UploadEvent::UploadStarted { ids: vec![FileId(0), FileId(1)] })
            .reduce(done(0))
            .reduce(failed(1))
            .reduce(UploadEvent::UploadSettled { dispatched: 2, failed: 1 });
        assert_eq!(many.message(), Some(MSG_ALL_UPLOADED));
    }

    #[test]
    fn test_report_failures_policy() {
        let state = UploadState::new(SettlePolicy::ReportFailures)
            .reduce(UploadEvent::FilesAdded(batch(&["a.txt", "b.txt"])))
            .reduce(UploadEvent::UploadStarted { ids: vec![FileId(0), FileId(1)] })
            .reduce(failed(0))
            .reduce(done(1))
            .reduce(UploadEvent::UploadSettled { dispatched: 2, failed: 1 });
        assert_eq!(state.message(), Some("1 of 2 files failed to upload"));
    }

    #[test]
    fn test_settle_after_clear_is_ignored() {
        let state = UploadState::default()
            .reduce(UploadEvent::FilesAdded(batch(&["a.txt"])))
            .reduce(UploadEvent::UploadStarted { ids: vec![FileId(0)] })
            .reduce(UploadEvent::Cleared)
            .reduce(UploadEvent::UploadSettled { dispatched: 1, failed: 0 });
        assert_eq!(state.status(), SessionStatus::Idle);
        assert_eq!(state.message(), None);
    }

    #[test]
    fn test_overlapping_batches_settle_once_drained() {
        let mut state = UploadState::default();
        let ids = state.add_files(batch(&["a.txt", "b.txt"]));

        state.apply(UploadEvent::UploadStarted { ids: vec![ids[0]] });
        state.apply(UploadEvent::ProgressUpdated {
            id: ids[0],
            percent: 70.0,
            uploaded: false,
        });
        state.apply(UploadEvent::UploadStarted { ids: ids.clone() });
        assert_eq!(state.in_flight(), 3);
        // The running request keeps its progress
        assert_eq!(state.progress(ids[0]).unwrap().percent, 70.0);

        // Second request for a.txt starts over but must not pull the bar back
        state.apply(UploadEvent::ProgressUpdated {
            id: ids[0],
            percent: 10.0,
            uploaded: false,
        });
        assert_eq!(state.progress(ids[0]).unwrap().percent, 70.0);

        state.apply(done(0));
        state.apply(done(0));
        state.apply(UploadEvent::UploadSettled { dispatched: 1, failed: 0 });
        assert_eq!(state.status(), SessionStatus::Uploading);
        assert_eq!(state.message(), Some(MSG_UPLOADING));

        state.apply(done(1));
        state.apply(UploadEvent::UploadSettled { dispatched: 2, failed: 0 });
        assert_eq!(state.in_flight(), 0);
        assert_eq!(state.status(), SessionStatus::AllUploaded);
        assert_eq!(state.message(), Some(MSG_ALL_UPLOADED));
    }

    #[test]
    fn test_late_progress_after_done_is_dropped() {
        let mut state = UploadState::default();
        let ids = state.add_files(batch(&["a.txt"]));
        state.apply(UploadEvent::UploadStarted { ids: ids.clone() });
        state.apply(UploadEvent::UploadStarted { ids: ids.clone() });

        state.apply(done(0));
        state.apply(UploadEvent::ProgressUpdated {
            id: ids[0],
            percent: 50.0,
            uploaded: false,
        });
        assert_eq!(state.progress(ids[0]), Some(ProgressRecord::DONE));
    }

    #[test]
    fn test_failure_after_reset_keeps_message_clear() {
        let mut state = UploadState::default();
        let ids = state.add_files(batch(&["a.txt"]));
        state.apply(UploadEvent::UploadStarted { ids: ids.clone() });

        // New selection while a.txt is still in flight
        state.add_files(batch(&["b.txt"]));
        state.apply(failed(0));
        assert_eq!(state.status(), SessionStatus::Idle);
        assert_eq!(state.message(), None);
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn test_failure_while_uploading_sets_message() {
        let mut state = UploadState::default();
        let ids = state.add_files(batch(&["a.txt", "b.txt"]));
        state.apply(UploadEvent::UploadStarted { ids });
        state.apply(failed(1));
        assert_eq!(state.message(), Some(MSG_UPLOAD_FAILED));
        assert_eq!(state.in_flight(), 1);
    }
}
