//! Balance poller
//!
//! Drives [`BalanceMonitor::tick`] on a fixed cadence. The loop is the
//! retry policy: a failed tick is logged and the next tick tries again.

use std::time::Duration;

use common::logger::{TraceId, root_span};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{Instrument, error, info};

use crate::pipeline::{BalanceMonitor, TickOutcome};

/// Runs until `max_ticks` ticks have completed, or forever when `None`.
pub async fn run_monitor_loop(
    mut monitor: BalanceMonitor,
    poll_every: Duration,
    max_ticks: Option<u64>,
) -> BalanceMonitor {
    let mut ticker = interval(poll_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        every_ms = poll_every.as_millis() as u64,
        max_ticks = ?max_ticks,
        "balance poller started"
    );

    let mut done = 0u64;
    while max_ticks.is_none_or(|max| done < max) {
        ticker.tick().await;

        let trace_id = TraceId::default();
        let span = root_span("tick", &trace_id);

        match monitor.tick().instrument(span).await {
            Ok(TickOutcome::Alerted(alert)) => {
                info!(trace_id = %trace_id, reason = %alert.reason, "tick raised alert");
            }
            Ok(TickOutcome::Quiet(_)) => {}
            Err(e) => {
                error!(trace_id = %trace_id, error = %e, "tick failed");
            }
        }

        done += 1;
    }

    info!(ticks = done, "balance poller stopped");
    monitor
}
