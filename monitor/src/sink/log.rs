use async_trait::async_trait;
use corelib::AlertRecord;
use tracing::warn;

use super::{AlertSink, SinkError};

/// Emits each alert as a structured WARN event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

#[async_trait]
impl AlertSink for LogSink {
    async fn emit(&self, alert: &AlertRecord) -> Result<(), SinkError> {
        warn!(
            reason = %alert.reason,
            account = %alert.target,
            previous = %alert.previous_quantity,
            current = %alert.current_quantity,
            diff = %alert.absolute_diff,
            milli_percent = %alert.relative_change,
            previous_block = alert.previous_block,
            current_block = alert.current_block,
            "balance alert"
        );
        Ok(())
    }
}
