pub mod config;
pub mod detector;
pub mod provider;
pub mod snapshotter;

pub use config::DetectorConfig;
pub use detector::{Detector, evaluate, relative_change_milli_percent};
pub use provider::{Observation, ProviderError, QuantityProvider};
pub use snapshotter::Snapshotter;
