use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use corelib::Quiet;

/// Minimal counters for operational visibility.
#[derive(Clone, Default, Debug)]
pub struct Counters {
    pub ticks: Arc<AtomicU64>,
    pub provider_errors: Arc<AtomicU64>,
    pub history_errors: Arc<AtomicU64>,

    pub alerts_emitted: Arc<AtomicU64>,
    pub delivery_errors: Arc<AtomicU64>,

    // quiet reasons
    pub quiet_insufficient_history: Arc<AtomicU64>,
    pub quiet_target_mismatch: Arc<AtomicU64>,
    pub quiet_dust_baseline: Arc<AtomicU64>,
    pub quiet_below_min_diff: Arc<AtomicU64>,
    pub quiet_zero_baseline: Arc<AtomicU64>,
    pub quiet_below_threshold: Arc<AtomicU64>,
}

impl Counters {
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }

    pub fn record_quiet(&self, quiet: Quiet) {
        let counter = match quiet {
            Quiet::InsufficientHistory => &self.quiet_insufficient_history,
            Quiet::TargetMismatch => &self.quiet_target_mismatch,
            Quiet::DustBaseline => &self.quiet_dust_baseline,
            Quiet::BelowMinimumDiff => &self.quiet_below_min_diff,
            Quiet::ZeroBaseline => &self.quiet_zero_baseline,
            Quiet::BelowThreshold => &self.quiet_below_threshold,
        };
        Self::incr(counter);
    }
}
