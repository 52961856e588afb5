use chrono::{DateTime, Utc};
use corelib::{AlertRecord, payload};
use serde::{Deserialize, Serialize};

/// JSON rendering of an alert for webhooks and the `decode` command.
///
/// Quantities are decimal strings: they are 256-bit and do not survive a
/// round trip through JSON numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub reason: String,
    pub target: String,
    pub previous_quantity: String,
    pub current_quantity: String,
    pub absolute_diff: String,
    /// Units of 0.001%.
    pub relative_change: String,
    pub previous_block: u64,
    pub current_block: u64,
    /// Hex of the ABI payload the event was decoded from.
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emitted_at: Option<DateTime<Utc>>,
}

impl AlertEvent {
    pub fn new(alert: &AlertRecord, emitted_at: Option<DateTime<Utc>>) -> Self {
        Self {
            reason: alert.reason.as_str().to_string(),
            target: alert.target.to_string(),
            previous_quantity: alert.previous_quantity.to_string(),
            current_quantity: alert.current_quantity.to_string(),
            absolute_diff: alert.absolute_diff.to_string(),
            relative_change: alert.relative_change.to_string(),
            previous_block: alert.previous_block,
            current_block: alert.current_block,
            payload: payload::to_hex(&payload::encode(alert)),
            emitted_at,
        }
    }
}
