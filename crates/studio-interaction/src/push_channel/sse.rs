//! `text/event-stream` subscription over reqwest.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{Client, header};
use studio_core::{Result, StudioError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{PushChannel, PushEvent, SseParser};
use crate::http::{error_from_response, transport_error};

/// Events buffered between the reader task and the consumer.
const EVENT_BUFFER: usize = 64;

/// Push channel backed by a streaming HTTP response.
///
/// A reader task decodes the body and forwards events; closing cancels the
/// task, which drops the response and with it the connection.
pub struct SseChannel {
    events: mpsc::Receiver<Result<PushEvent>>,
    cancel: CancellationToken,
    reader: Option<JoinHandle<()>>,
    closed: bool,
}

impl SseChannel {
    /// Opens `url`. Fails if the server rejects the subscription.
    pub async fn open(client: &Client, url: &str) -> Result<Self> {
        let response = client
            .get(url)
            .header(header::ACCEPT, "text/event-stream")
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(Self::spawn(response.bytes_stream(), url.to_string()))
    }

    /// Starts the reader task over any chunked body.
    fn spawn<S, B, E>(body: S, url: String) -> Self
    where
        S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send,
        E: std::fmt::Display + Send,
    {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let reader = tokio::spawn(async move {
            let mut body = std::pin::pin!(body);
            let mut parser = SseParser::new();
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!(url = %url, "push channel cancelled");
                        break;
                    }
                    chunk = body.next() => match chunk {
                        Some(Ok(bytes)) => {
                            for event in parser.feed(bytes.as_ref()) {
                                if tx.send(Ok(event)).await.is_err() {
                                    return;
                                }
                            }
                        }
                        Some(Err(e)) => {
                            let _ = tx.send(Err(StudioError::network(e.to_string()))).await;
                            break;
                        }
                        None => {
                            if let Some(event) = parser.finish() {
                                let _ = tx.send(Ok(event)).await;
                            }
                            tracing::debug!(url = %url, "push channel ended by server");
                            break;
                        }
                    },
                }
            }
        });

        Self {
            events: rx,
            cancel,
            reader: Some(reader),
            closed: false,
        }
    }
}

#[async_trait]
impl PushChannel for SseChannel {
    async fn next_event(&mut self) -> Option<Result<PushEvent>> {
        if self.closed {
            return None;
        }
        self.events.recv().await
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.cancel.cancel();
        self.events.close();
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for SseChannel {
    fn drop(&mut self) {
        self.close();
    }
}
