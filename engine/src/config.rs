use corelib::Quantity;
use serde::Deserialize;

/// Fixed-point scale of relative change: 100_000 units == 100%,
/// so one unit is 0.001%.
pub const MILLI_PERCENT_SCALE: u64 = 100_000;

/// 300 units == 0.3%.
pub const DEFAULT_THRESHOLD_MILLI_PERCENT: u64 = 300;

/// Detection thresholds for one monitor instance.
///
/// Deserializes from a partial object; missing fields keep their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum relative change, in units of 0.001%, that raises an alert.
    pub threshold_milli_percent: u64,

    /// Dust floor. A previous quantity at or below this value never alerts.
    /// Zero disables the floor.
    pub min_previous_quantity: Quantity,

    /// Absolute changes smaller than this never alert.
    pub min_absolute_diff: Quantity,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold_milli_percent: DEFAULT_THRESHOLD_MILLI_PERCENT,
            min_previous_quantity: Quantity::ZERO,
            min_absolute_diff: Quantity::ZERO,
        }
    }
}

impl DetectorConfig {
    pub fn with_threshold(mut self, milli_percent: u64) -> Self {
        self.threshold_milli_percent = milli_percent;
        self
    }

    pub fn with_min_previous_quantity(mut self, floor: Quantity) -> Self {
        self.min_previous_quantity = floor;
        self
    }

    pub fn with_min_absolute_diff(mut self, min: Quantity) -> Self {
        self.min_absolute_diff = min;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn partial_object_keeps_remaining_defaults() {
        let cfg: DetectorConfig =
            serde_json::from_str(r#"{"threshold_milli_percent":1500}"#).unwrap();

        assert_eq!(cfg.threshold_milli_percent, 1_500);
        assert_eq!(cfg.min_previous_quantity, Quantity::ZERO);
        assert_eq!(cfg.min_absolute_diff, Quantity::ZERO);
    }

    #[test]
    fn empty_object_is_the_default_config() {
        let cfg: DetectorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, DetectorConfig::default());
    }

    #[test]
    fn quantities_accept_hex_strings() {
        let cfg: DetectorConfig = serde_json::from_str(
            r#"{"min_previous_quantity":"0xde0b6b3a7640000","min_absolute_diff":"0x2a"}"#,
        )
        .unwrap();

        assert_eq!(cfg.threshold_milli_percent, DEFAULT_THRESHOLD_MILLI_PERCENT);
        assert_eq!(
            cfg.min_previous_quantity,
            U256::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(cfg.min_absolute_diff, U256::from(42u64));
    }
}
