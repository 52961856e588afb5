//! Balance change detector.
//!
//! Compares two snapshots of the same account and decides whether the
//! relative change crosses the configured threshold.
//!
//! ## Relative change
//! Change is measured in hundred-thousandths (0.001% units):
//! ```text
//! milli_percent = floor(|current - previous| * 100_000 / previous)
//! ```
//! The product is taken in 512-bit precision so no pair of 256-bit
//! quantities can overflow; a quotient that does not fit 256 bits
//! saturates at `U256::MAX`.
//!
//! ## Guards, in evaluation order
//! 1. fewer than two snapshots → `InsufficientHistory`
//! 2. different targets → `TargetMismatch`
//! 3. previous at or below a non-zero dust floor → `DustBaseline`
//! 4. absolute change below the configured minimum → `BelowMinimumDiff`
//! 5. previous is zero: current > 0 is a SPIKE regardless of threshold,
//!    otherwise `ZeroBaseline`
//! 6. relative change below threshold → `BelowThreshold`
//!
//! ## Determinism
//! Evaluation is a pure function of (current, previous, config). Any I/O
//! (provider reads, history, delivery, logging) lives outside this module.

use alloy::primitives::{U256, U512};
use corelib::{AlertReason, AlertRecord, DecodeError, DetectionResult, Quantity, Quiet, Snapshot};

use crate::config::{DetectorConfig, MILLI_PERCENT_SCALE};

/// Relative change recorded for a zero-to-nonzero transition, where the
/// ratio is undefined.
pub const ZERO_BASELINE_CHANGE: Quantity = U256::MAX;

/// `floor(diff * 100_000 / base)`, saturating at `U256::MAX`.
///
/// Returns `None` for a zero base.
pub fn relative_change_milli_percent(diff: Quantity, base: Quantity) -> Option<Quantity> {
    if base.is_zero() {
        return None;
    }

    let scaled = U512::from(diff) * U512::from(MILLI_PERCENT_SCALE);
    Some(U256::saturating_from(scaled / U512::from(base)))
}

/// Evaluates `current` against `previous` under `config`.
pub fn evaluate(current: &Snapshot, previous: &Snapshot, config: &DetectorConfig) -> DetectionResult {
    if !current.is_comparable(previous) {
        return DetectionResult::NotTriggered(Quiet::TargetMismatch);
    }

    let prev = previous.quantity;
    let curr = current.quantity;

    // A zero floor is "disabled" so that a zero baseline reaches its own policy below.
    if !config.min_previous_quantity.is_zero() && prev <= config.min_previous_quantity {
        return DetectionResult::NotTriggered(Quiet::DustBaseline);
    }

    let absolute_diff = if curr >= prev { curr - prev } else { prev - curr };

    if absolute_diff < config.min_absolute_diff {
        return DetectionResult::NotTriggered(Quiet::BelowMinimumDiff);
    }

    let relative_change = match relative_change_milli_percent(absolute_diff, prev) {
        Some(change) => {
            if change < U256::from(config.threshold_milli_percent) {
                return DetectionResult::NotTriggered(Quiet::BelowThreshold);
            }
            change
        }
        None if curr.is_zero() => return DetectionResult::NotTriggered(Quiet::ZeroBaseline),
        None => ZERO_BASELINE_CHANGE,
    };

    let reason = if curr < prev {
        AlertReason::Drop
    } else {
        AlertReason::Spike
    };

    DetectionResult::Triggered(AlertRecord {
        reason,
        target: current.target,
        previous_quantity: prev,
        current_quantity: curr,
        absolute_diff,
        relative_change,
        previous_block: previous.block,
        current_block: current.block,
    })
}

/// A configured detector. Cheap to copy; holds no state across calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn evaluate(&self, current: &Snapshot, previous: &Snapshot) -> DetectionResult {
        evaluate(current, previous, &self.config)
    }

    /// Evaluates the two newest entries of `history` (newest first).
    ///
    /// Fewer than two entries is the normal startup state, not an error.
    pub fn evaluate_history(&self, history: &[Snapshot]) -> DetectionResult {
        match history {
            [current, previous, ..] => self.evaluate(current, previous),
            _ => DetectionResult::NotTriggered(Quiet::InsufficientHistory),
        }
    }

    /// Same as [`Detector::evaluate_history`] over opaque encoded snapshots.
    ///
    /// Only the first two entries are decoded; a malformed one is an error.
    pub fn evaluate_encoded<B: AsRef<[u8]>>(
        &self,
        history: &[B],
    ) -> Result<DetectionResult, DecodeError> {
        match history {
            [current, previous, ..] => {
                let current = Snapshot::decode(current.as_ref())?;
                let previous = Snapshot::decode(previous.as_ref())?;
                Ok(self.evaluate(&current, &previous))
            }
            _ => Ok(DetectionResult::NotTriggered(Quiet::InsufficientHistory)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, address};
    use corelib::TargetId;

    const TARGET: TargetId = address!("0x66ef8a2ab4f2d80be5a71e1d2dc5f5ed11d9a3c1");

    fn snap(quantity: u64, block: u64) -> Snapshot {
        Snapshot::new(TARGET, U256::from(quantity), block)
    }

    fn detector() -> Detector {
        Detector::new(DetectorConfig::default())
    }

    fn alert(res: DetectionResult) -> AlertRecord {
        match res {
            DetectionResult::Triggered(a) => a,
            other => panic!("expected alert, got {other:?}"),
        }
    }

    #[test]
    fn spike_at_exact_threshold_triggers() {
        let res = detector().evaluate(&snap(1_003_000, 11), &snap(1_000_000, 10));

        let a = alert(res);
        assert_eq!(a.reason, AlertReason::Spike);
        assert_eq!(a.absolute_diff, U256::from(3_000u64));
        assert_eq!(a.relative_change, U256::from(300u64));
        assert_eq!(a.previous_block, 10);
        assert_eq!(a.current_block, 11);
        assert_eq!(a.target, TARGET);
    }

    #[test]
    fn one_unit_below_threshold_is_quiet() {
        let res = detector().evaluate(&snap(1_002_999, 11), &snap(1_000_000, 10));
        assert_eq!(res, DetectionResult::NotTriggered(Quiet::BelowThreshold));
    }

    #[test]
    fn drop_at_exact_threshold_triggers() {
        let a = alert(detector().evaluate(&snap(997_000, 11), &snap(1_000_000, 10)));

        assert_eq!(a.reason, AlertReason::Drop);
        assert_eq!(a.absolute_diff, U256::from(3_000u64));
        assert_eq!(a.relative_change, U256::from(300u64));
        assert_eq!(a.previous_quantity, U256::from(1_000_000u64));
        assert_eq!(a.current_quantity, U256::from(997_000u64));
    }

    #[test]
    fn zero_to_zero_is_quiet() {
        let res = detector().evaluate(&snap(0, 11), &snap(0, 10));
        assert_eq!(res, DetectionResult::NotTriggered(Quiet::ZeroBaseline));
    }

    #[test]
    fn zero_to_nonzero_is_a_spike_regardless_of_threshold() {
        let d = Detector::new(DetectorConfig::default().with_threshold(u64::MAX));

        let a = alert(d.evaluate(&snap(5, 11), &snap(0, 10)));
        assert_eq!(a.reason, AlertReason::Spike);
        assert_eq!(a.absolute_diff, U256::from(5u64));
        assert_eq!(a.relative_change, ZERO_BASELINE_CHANGE);
    }

    #[test]
    fn minimum_diff_guard_runs_before_zero_baseline_policy() {
        let d = Detector::new(
            DetectorConfig::default().with_min_absolute_diff(U256::from(10u64)),
        );

        assert_eq!(
            d.evaluate(&snap(5, 11), &snap(0, 10)),
            DetectionResult::NotTriggered(Quiet::BelowMinimumDiff)
        );
        assert!(d.evaluate(&snap(10, 11), &snap(0, 10)).is_triggered());
    }

    #[test]
    fn dust_floor_suppresses_any_change() {
        let d = Detector::new(
            DetectorConfig::default().with_min_previous_quantity(U256::from(1_000u64)),
        );

        for current in [0, 499, 500, 501, 1_000_000] {
            assert_eq!(
                d.evaluate(&snap(current, 11), &snap(500, 10)),
                DetectionResult::NotTriggered(Quiet::DustBaseline),
                "current = {current}"
            );
        }
    }

    #[test]
    fn dust_floor_is_inclusive() {
        let d = Detector::new(
            DetectorConfig::default().with_min_previous_quantity(U256::from(1_000u64)),
        );

        assert_eq!(
            d.evaluate(&snap(2_000, 11), &snap(1_000, 10)),
            DetectionResult::NotTriggered(Quiet::DustBaseline)
        );
        assert!(d.evaluate(&snap(2_000, 11), &snap(1_001, 10)).is_triggered());
    }

    #[test]
    fn non_zero_floor_also_covers_zero_baseline() {
        let d = Detector::new(
            DetectorConfig::default().with_min_previous_quantity(U256::from(1u64)),
        );

        assert_eq!(
            d.evaluate(&snap(5, 11), &snap(0, 10)),
            DetectionResult::NotTriggered(Quiet::DustBaseline)
        );
    }

    #[test]
    fn minimum_absolute_diff_guard() {
        let d = Detector::new(
            DetectorConfig::default().with_min_absolute_diff(U256::from(10_000u64)),
        );

        // 1% change but only 9_999 units
        assert_eq!(
            d.evaluate(&snap(1_009_999, 11), &snap(1_000_000, 10)),
            DetectionResult::NotTriggered(Quiet::BelowMinimumDiff)
        );
        assert!(d.evaluate(&snap(1_010_000, 11), &snap(1_000_000, 10)).is_triggered());
    }

    #[test]
    fn mismatched_targets_never_alert() {
        let other = Snapshot::new(Address::ZERO, U256::from(5_000_000u64), 11);

        assert_eq!(
            detector().evaluate(&other, &snap(1_000_000, 10)),
            DetectionResult::NotTriggered(Quiet::TargetMismatch)
        );
    }

    #[test]
    fn equal_quantities_only_alert_in_degenerate_config() {
        assert_eq!(
            detector().evaluate(&snap(1_000, 11), &snap(1_000, 10)),
            DetectionResult::NotTriggered(Quiet::BelowThreshold)
        );

        let degenerate = Detector::new(DetectorConfig::default().with_threshold(0));
        let a = alert(degenerate.evaluate(&snap(1_000, 11), &snap(1_000, 10)));
        assert_eq!(a.reason, AlertReason::Spike);
        assert_eq!(a.absolute_diff, U256::ZERO);
    }

    #[test]
    fn floor_matches_hand_computed_rationals() {
        // (diff, base, expected floor(diff * 100_000 / base))
        let cases: [(u64, u64, u64); 6] = [
            (1, 3, 33_333),           // 33_333.33…
            (2, 3, 66_666),           // 66_666.66…
            (1, 100_001, 0),          // 0.99999…
            (7, 2_333, 300),          // 300.04…
            (2_999, 1_000_000, 299),  // 299.9
            (3_000, 1_000_000, 300),
        ];

        for (diff, base, expected) in cases {
            assert_eq!(
                relative_change_milli_percent(U256::from(diff), U256::from(base)),
                Some(U256::from(expected)),
                "{diff} / {base}"
            );
        }
    }

    #[test]
    fn huge_quantities_do_not_overflow() {
        let prev = Snapshot::new(TARGET, U256::MAX, 10);
        let curr = Snapshot::new(TARGET, U256::ZERO, 11);

        let a = alert(detector().evaluate(&curr, &prev));
        assert_eq!(a.reason, AlertReason::Drop);
        assert_eq!(a.relative_change, U256::from(MILLI_PERCENT_SCALE));
    }

    #[test]
    fn ratio_beyond_u256_saturates() {
        let prev = Snapshot::new(TARGET, U256::from(1u64), 10);
        let curr = Snapshot::new(TARGET, U256::MAX, 11);

        let a = alert(detector().evaluate(&curr, &prev));
        assert_eq!(a.relative_change, U256::MAX);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let d = detector();
        let (c, p) = (snap(997_000, 11), snap(1_000_000, 10));

        assert_eq!(d.evaluate(&c, &p), d.evaluate(&c, &p));
    }

    #[test]
    fn history_shorter_than_two_is_not_an_error() {
        let d = detector();

        assert_eq!(
            d.evaluate_history(&[]),
            DetectionResult::NotTriggered(Quiet::InsufficientHistory)
        );
        assert_eq!(
            d.evaluate_history(&[snap(1, 1)]),
            DetectionResult::NotTriggered(Quiet::InsufficientHistory)
        );
    }

    #[test]
    fn history_uses_only_the_two_newest_entries() {
        let d = detector();
        // the oldest entry would be a huge spike against the newest one
        let history = [snap(1_000_000, 12), snap(1_000_000, 11), snap(1, 10)];

        assert_eq!(
            d.evaluate_history(&history),
            DetectionResult::NotTriggered(Quiet::BelowThreshold)
        );
    }

    #[test]
    fn encoded_history_is_decoded_then_evaluated() {
        let d = detector();
        let history = vec![snap(1_003_000, 11).encode(), snap(1_000_000, 10).encode()];

        let res = d.evaluate_encoded(&history).unwrap();
        assert_eq!(alert(res).relative_change, U256::from(300u64));

        let single = vec![snap(1, 1).encode()];
        assert_eq!(
            d.evaluate_encoded(&single).unwrap(),
            DetectionResult::NotTriggered(Quiet::InsufficientHistory)
        );
    }

    #[test]
    fn malformed_encoded_snapshot_is_reported() {
        let history = vec![snap(1, 11).encode().to_vec(), vec![0u8; 7]];

        assert!(matches!(
            detector().evaluate_encoded(&history),
            Err(DecodeError::Length { actual: 7, .. })
        ));
    }
}
