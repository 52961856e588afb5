//! Alert delivery.
//!
//! The pipeline hands sinks an encoded payload through [`deliver_payload`];
//! sinks only ever see a decoded [`AlertRecord`].

pub mod event;
pub mod log;
pub mod webhook;

use std::sync::Arc;

use async_trait::async_trait;
use corelib::{AlertRecord, DecodeError, payload};
use thiserror::Error;
use tracing::warn;

pub use event::AlertEvent;
pub use log::LogSink;
pub use webhook::WebhookSink;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("malformed alert payload: {0}")]
    Decode(#[from] DecodeError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook responded with status {0}")]
    Status(u16),
}

/// Turns an alert into an observable event (log line, webhook call, ...).
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn emit(&self, alert: &AlertRecord) -> Result<(), SinkError>;
}

#[async_trait]
impl<S: AlertSink + ?Sized> AlertSink for Arc<S> {
    async fn emit(&self, alert: &AlertRecord) -> Result<(), SinkError> {
        (**self).emit(alert).await
    }
}

/// Sink boundary: decode `payload` and emit it once.
///
/// A malformed payload is reported and never reaches the sink.
pub async fn deliver_payload<S>(sink: &S, payload: &[u8]) -> Result<AlertRecord, SinkError>
where
    S: AlertSink + ?Sized,
{
    let alert = payload::decode(payload)?;
    sink.emit(&alert).await?;
    Ok(alert)
}

/// Emits to every inner sink in order. A failing sink does not stop the
/// others; the first error is returned.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl AlertSink for FanoutSink {
    async fn emit(&self, alert: &AlertRecord) -> Result<(), SinkError> {
        let mut first_err = None;

        for sink in &self.sinks {
            if let Err(e) = sink.emit(alert).await {
                warn!(error = %e, "alert sink failed");
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
