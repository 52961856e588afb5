use super::AlertRecord;

/// Why an evaluation did not raise an alert.
///
/// These are policy outcomes, not failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quiet {
    /// Fewer than two snapshots were available.
    InsufficientHistory,
    /// The snapshots observe different targets.
    TargetMismatch,
    /// Previous quantity is at or below the configured dust floor.
    DustBaseline,
    /// Absolute change is below the configured minimum.
    BelowMinimumDiff,
    /// Previous quantity is zero and current is zero too.
    ZeroBaseline,
    /// Relative change is below the threshold.
    BelowThreshold,
}

impl Quiet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quiet::InsufficientHistory => "insufficient_history",
            Quiet::TargetMismatch => "target_mismatch",
            Quiet::DustBaseline => "dust_baseline",
            Quiet::BelowMinimumDiff => "below_minimum_diff",
            Quiet::ZeroBaseline => "zero_baseline",
            Quiet::BelowThreshold => "below_threshold",
        }
    }
}

/// Outcome of comparing two snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetectionResult {
    NotTriggered(Quiet),
    Triggered(AlertRecord),
}

impl DetectionResult {
    pub fn is_triggered(&self) -> bool {
        matches!(self, DetectionResult::Triggered(_))
    }

    pub fn alert(&self) -> Option<&AlertRecord> {
        match self {
            DetectionResult::Triggered(alert) => Some(alert),
            DetectionResult::NotTriggered(_) => None,
        }
    }

    pub fn into_alert(self) -> Option<AlertRecord> {
        match self {
            DetectionResult::Triggered(alert) => Some(alert),
            DetectionResult::NotTriggered(_) => None,
        }
    }

    pub fn quiet(&self) -> Option<Quiet> {
        match self {
            DetectionResult::NotTriggered(q) => Some(*q),
            DetectionResult::Triggered(_) => None,
        }
    }
}
