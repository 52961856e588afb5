//! One monitor tick:
//!
//! ```text
//! Provider → Snapshotter → History → Detector → payload → Sink
//! ```
//!
//! The detector stays pure; everything stateful (history, counters,
//! delivery) is owned here.

use std::sync::Arc;

use common::logger::{annotate_span, child_span};
use corelib::{AlertRecord, DetectionResult, Quiet, payload};
use engine::{Detector, QuantityProvider, Snapshotter};
use tracing::{Instrument, debug, info};

use crate::error::MonitorError;
use crate::history::SnapshotHistory;
use crate::metrics::Counters;
use crate::sink::{AlertSink, deliver_payload};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Quiet(Quiet),
    Alerted(AlertRecord),
}

pub struct BalanceMonitor {
    snapshotter: Snapshotter,
    detector: Detector,
    provider: Arc<dyn QuantityProvider>,
    sink: Arc<dyn AlertSink>,
    history: SnapshotHistory,
    counters: Counters,
}

impl BalanceMonitor {
    pub fn new(
        snapshotter: Snapshotter,
        detector: Detector,
        provider: Arc<dyn QuantityProvider>,
        sink: Arc<dyn AlertSink>,
        history_len: usize,
        counters: Counters,
    ) -> Self {
        Self {
            snapshotter,
            detector,
            provider,
            sink,
            history: SnapshotHistory::new(history_len),
            counters,
        }
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    /// Captures one snapshot, compares it with the previous one and
    /// delivers at most one alert.
    ///
    /// A provider failure leaves the history untouched; retrying is up to
    /// the caller.
    pub async fn tick(&mut self) -> Result<TickOutcome, MonitorError> {
        Counters::incr(&self.counters.ticks);

        let snapshot = match self.snapshotter.capture(self.provider.as_ref()).await {
            Ok(s) => s,
            Err(e) => {
                Counters::incr(&self.counters.provider_errors);
                return Err(e.into());
            }
        };
        annotate_span(&snapshot.target, snapshot.block);

        self.history.push(snapshot.encode());

        let result = match self.detector.evaluate_encoded(self.history.newest_first()) {
            Ok(r) => r,
            Err(e) => {
                Counters::incr(&self.counters.history_errors);
                // drop the corrupt entries so the next tick starts clean
                self.history.clear();
                return Err(e.into());
            }
        };

        let alert = match result {
            DetectionResult::NotTriggered(quiet) => {
                self.counters.record_quiet(quiet);
                debug!(quiet = quiet.as_str(), quantity = %snapshot.quantity, "no alert");
                return Ok(TickOutcome::Quiet(quiet));
            }
            DetectionResult::Triggered(alert) => alert,
        };

        let encoded = payload::encode(&alert);
        match deliver_payload(self.sink.as_ref(), &encoded)
            .instrument(child_span("deliver"))
            .await
        {
            Ok(delivered) => {
                Counters::incr(&self.counters.alerts_emitted);
                info!(
                    reason = %delivered.reason,
                    milli_percent = %delivered.relative_change,
                    "alert delivered"
                );
                Ok(TickOutcome::Alerted(delivered))
            }
            Err(e) => {
                Counters::incr(&self.counters.delivery_errors);
                Err(e.into())
            }
        }
    }
}
