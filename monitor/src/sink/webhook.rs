use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use corelib::AlertRecord;
use reqwest::Client;
use tracing::{debug, instrument};

use super::{AlertEvent, AlertSink, SinkError};

/// POSTs each alert as an [`AlertEvent`] JSON body.
#[derive(Clone)]
pub struct WebhookSink {
    http: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: String) -> Result<Self, SinkError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AlertSink for WebhookSink {
    #[instrument(skip(self, alert), fields(url = %self.url), level = "debug")]
    async fn emit(&self, alert: &AlertRecord) -> Result<(), SinkError> {
        let event = AlertEvent::new(alert, Some(Utc::now()));

        let resp = self.http.post(&self.url).json(&event).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SinkError::Status(status.as_u16()));
        }

        debug!(status = status.as_u16(), "webhook delivered");
        Ok(())
    }
}
