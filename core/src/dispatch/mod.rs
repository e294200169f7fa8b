//! Upload dispatcher.
//!
//! Fires one request per selected file through a [`Transport`], all at once,
//! and waits for every one of them to settle:
//!
//! ```text
//!                    ┌──▶ send(a.txt) ──▶ ProgressUpdated.. ──▶ Ok / Failed ──┐
//! UploadStarted ─────┼──▶ send(b.txt) ──▶ ProgressUpdated.. ──▶ Ok / Failed ──┼──▶ UploadSettled
//!                    └──▶ send(c.txt) ──▶ ProgressUpdated.. ──▶ Ok / Failed ──┘
//! ```
//!
//! Events are written back through an `emit` callback, usually
//! `|event| state.apply(event)`. One failing request never cancels its
//! siblings; there is no retry and no timeout.

use std::cell::Cell;

use futures::future::join_all;

use crate::error::{TransportError, TransportResult, UploadError, UploadResult};
use crate::models::{percent_of, FileId, SelectedFile};
use crate::store::UploadEvent;

/// Sends one file to the upload endpoint.
///
/// Implementations report transferred bytes through `progress` and resolve
/// once the server answered (2xx is `Ok`).
#[allow(async_fn_in_trait)]
pub trait Transport<P> {
    async fn send(&self, file: &SelectedFile<P>, progress: &ProgressSink<'_, P>) -> TransportResult<()>;
}

/// Progress callback handed to a transport for one file.
pub struct ProgressSink<'a, P> {
    id: FileId,
    last: Cell<f64>,
    emit: &'a dyn Fn(UploadEvent<P>),
}

impl<'a, P> ProgressSink<'a, P> {
    pub fn new(id: FileId, emit: &'a dyn Fn(UploadEvent<P>)) -> Self {
        Self {
            id,
            last: Cell::new(0.0),
            emit,
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    /// Report `sent` of `total` bytes transferred.
    ///
    /// Reports going backwards are dropped so the record never decreases.
    pub fn report(&self, sent: u64, total: u64) {
        let percent = percent_of(sent, total);
        if percent < self.last.get() {
            return;
        }
        self.last.set(percent);
        (self.emit)(UploadEvent::ProgressUpdated {
            id: self.id,
            percent,
            uploaded: false,
        });
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Default, PartialEq)]
pub struct DispatchReport {
    pub dispatched: usize,
    pub failed: Vec<(FileId, TransportError)>,
}

impl DispatchReport {
    pub fn succeeded(&self) -> usize {
        self.dispatched - self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Upload every file concurrently and wait for all of them to settle.
///
/// Fails only with [`UploadError::NoFilesSelected`]; per-file errors end up in
/// the returned report.
pub async fn dispatch<P, T>(
    files: &[SelectedFile<P>],
    transport: &T,
    emit: &dyn Fn(UploadEvent<P>),
) -> UploadResult<DispatchReport>
where
    T: Transport<P>,
{
    if files.is_empty() {
        log::warn!("Upload requested with no file selected");
        emit(UploadEvent::NoFilesSelected);
        return Err(UploadError::NoFilesSelected);
    }

    log::info!("📤 Uploading {} file(s)", files.len());
    emit(UploadEvent::UploadStarted {
        ids: files.iter().map(|f| f.id).collect(),
    });

    let outcomes = join_all(files.iter().map(|file| upload_one(file, transport, emit))).await;

    let failed: Vec<(FileId, TransportError)> = files
        .iter()
        .zip(outcomes)
        .filter_map(|(file, outcome)| outcome.err().map(|e| (file.id, e)))
        .collect();

    let report = DispatchReport {
        dispatched: files.len(),
        failed,
    };
    log::info!(
        "Upload settled: {}/{} succeeded",
        report.succeeded(),
        report.dispatched
    );
    emit(UploadEvent::UploadSettled {
        dispatched: report.dispatched,
        failed: report.failed.len(),
    });
    Ok(report)
}

async fn upload_one<P, T>(
    file: &SelectedFile<P>,
    transport: &T,
    emit: &dyn Fn(UploadEvent<P>),
) -> TransportResult<()>
where
    T: Transport<P>,
{
    let sink = ProgressSink::new(file.id, emit);
    match transport.send(file, &sink).await {
        Ok(()) => {
            log::debug!("✅ {} uploaded ({} bytes)", file.name, file.size);
            emit(UploadEvent::ProgressUpdated {
                id: file.id,
                percent: 100.0,
                uploaded: true,
            });
            Ok(())
        }
        Err(e) => {
            log::error!("❌ Upload of {} failed: {}", file.name, e);
            emit(UploadEvent::UploadFailed {
                id: file.id,
                error: e.to_string(),
            });
            Err(e)
        }
    }
}
