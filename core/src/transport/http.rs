//! Native multipart transport built on `reqwest`.
//!
//! The payload is streamed to the server in chunks; every chunk handed to the
//! HTTP stack is counted as sent and reported to the dispatcher.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tokio::sync::mpsc;

use crate::config::UploadConfig;
use crate::dispatch::{ProgressSink, Transport};
use crate::error::{TransportError, TransportResult};
use crate::models::SelectedFile;

/// Uploads in-memory files to the configured endpoint.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    config: UploadConfig,
}

impl HttpTransport {
    pub fn new(config: UploadConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing client (proxy, TLS settings...).
    pub fn with_client(client: Client, config: UploadConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(UploadConfig::default())
    }
}

/// Split `payload` into chunks, pushing the running byte count to `sent`
/// each time a chunk is pulled by the HTTP stack.
fn counted_chunks(
    payload: Bytes,
    chunk_size: usize,
    sent: mpsc::UnboundedSender<u64>,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    let total = payload.len();
    stream::iter((0..total).step_by(chunk_size.max(1))).map(move |start| {
        let end = (start + chunk_size).min(total);
        // Receiver gone means the request already settled
        let _ = sent.send(end as u64);
        Ok(payload.slice(start..end))
    })
}

impl Transport<Bytes> for HttpTransport {
    async fn send(
        &self,
        file: &SelectedFile<Bytes>,
        progress: &ProgressSink<'_, Bytes>,
    ) -> TransportResult<()> {
        let total = file.payload.len() as u64;
        let (sent_tx, mut sent_rx) = mpsc::unbounded_channel();

        let body = Body::wrap_stream(counted_chunks(
            file.payload.clone(),
            self.config.chunk_size,
            sent_tx,
        ));
        let part = Part::stream_with_length(body, total).file_name(file.name.clone());
        let form = Form::new().part(self.config.field_name.clone(), part);

        let request = self
            .client
            .post(&self.config.endpoint)
            .header(self.config.header_name.as_str(), self.config.header_value.as_str())
            .multipart(form)
            .send();
        tokio::pin!(request);

        let result = loop {
            tokio::select! {
                biased;
                Some(bytes) = sent_rx.recv() => progress.report(bytes, total),
                result = &mut request => break result,
            }
        };
        while let Ok(bytes) = sent_rx.try_recv() {
            progress.report(bytes, total);
        }

        let response = result.map_err(|e| {
            if e.is_builder() {
                TransportError::Request(e.to_string())
            } else {
                TransportError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
