//! XMLHttpRequest transport for browser uploads.
//!
//! `fetch` has no upload progress, so each file goes through its own
//! `XMLHttpRequest` and `upload.onprogress` feeds the dispatcher.

use dropload::{ProgressSink, SelectedFile, Transport, TransportError, TransportResult, UploadConfig};
use futures::channel::mpsc;
use futures::StreamExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, FormData, ProgressEvent, XmlHttpRequest};

/// What the XHR callbacks report back to the awaiting future.
enum XhrEvent {
    Progress { loaded: u64, total: u64 },
    Loaded,
    Failed(&'static str),
}

/// Uploads `web_sys::File`s as multipart `FormData`.
#[derive(Clone, Debug)]
pub struct XhrTransport {
    config: UploadConfig,
}

impl XhrTransport {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }
}

fn js_error(context: &str, e: JsValue) -> TransportError {
    TransportError::Request(format!("{}: {:?}", context, e))
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map a finished request to the transport result.
fn settle(xhr: &XmlHttpRequest) -> TransportResult<()> {
    let status = xhr
        .status()
        .map_err(|e| js_error("Failed to read status", e))?;
    if is_success(status) {
        return Ok(());
    }
    let body = xhr.response_text().ok().flatten().unwrap_or_default();
    Err(TransportError::Status { status, body })
}

/// Closure forwarding a plain event as `event` on `tx`.
fn forward(tx: &mpsc::UnboundedSender<XhrEvent>, event: fn() -> XhrEvent) -> Closure<dyn FnMut(Event)> {
    let tx = tx.clone();
    Closure::wrap(Box::new(move |_: Event| {
        let _ = tx.unbounded_send(event());
    }) as Box<dyn FnMut(Event)>)
}

impl Transport<File> for XhrTransport {
    async fn send(&self, file: &SelectedFile<File>, progress: &ProgressSink<'_, File>) -> TransportResult<()> {
        let form = FormData::new().map_err(|e| js_error("Failed to create FormData", e))?;
        form.append_with_blob_and_filename(&self.config.field_name, &file.payload, &file.name)
            .map_err(|e| js_error("Failed to append file", e))?;

        let xhr = XmlHttpRequest::new().map_err(|e| js_error("Failed to create request", e))?;
        xhr.open_with_async("POST", &self.config.endpoint, true)
            .map_err(|e| js_error("Failed to open request", e))?;
        xhr.set_request_header(&self.config.header_name, &self.config.header_value)
            .map_err(|e| js_error("Failed to set header", e))?;
        let upload = xhr.upload().map_err(|e| js_error("Failed to access upload", e))?;

        let (tx, mut rx) = mpsc::unbounded::<XhrEvent>();

        let on_progress = {
            let tx = tx.clone();
            Closure::wrap(Box::new(move |ev: ProgressEvent| {
                if ev.length_computable() {
                    let _ = tx.unbounded_send(XhrEvent::Progress {
                        loaded: ev.loaded() as u64,
                        total: ev.total() as u64,
                    });
                }
            }) as Box<dyn FnMut(ProgressEvent)>)
        };
        let on_load = forward(&tx, || XhrEvent::Loaded);
        let on_error = forward(&tx, || XhrEvent::Failed("network error"));
        let on_abort = forward(&tx, || XhrEvent::Failed("request aborted"));
        let on_timeout = forward(&tx, || XhrEvent::Failed("request timed out"));
        drop(tx);

        upload.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(on_abort.as_ref().unchecked_ref()));
        xhr.set_ontimeout(Some(on_timeout.as_ref().unchecked_ref()));

        let outcome = match xhr.send_with_opt_form_data(Some(&form)) {
            Err(e) => Err(js_error("Failed to send request", e)),
            Ok(()) => loop {
                match rx.next().await {
                    Some(XhrEvent::Progress { loaded, total }) => progress.report(loaded, total),
                    Some(XhrEvent::Loaded) => break settle(&xhr),
                    Some(XhrEvent::Failed(reason)) => break Err(TransportError::Network(reason.to_string())),
                    None => break Err(TransportError::Network("request dropped".to_string())),
                }
            },
        };

        // Detach the handlers before their closures are dropped
        upload.set_onprogress(None);
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_onabort(None);
        xhr.set_ontimeout(None);

        outcome
    }
}
