mod alert;
mod detection;
mod snapshot;

pub use alert::{AlertReason, AlertRecord};
pub use detection::{DetectionResult, Quiet};
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};

/// Identity of the monitored account.
pub type TargetId = alloy::primitives::Address;

/// Tracked quantity (account balance in base units).
pub type Quantity = alloy::primitives::U256;

/// Monotonic sequence marker of an observation (block height).
pub type BlockHeight = u64;
