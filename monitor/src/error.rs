use corelib::DecodeError;
use engine::ProviderError;
use thiserror::Error;

use crate::sink::SinkError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Failure of a single monitor tick. The poll loop logs it and moves on.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("snapshot capture failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("snapshot history is corrupt: {0}")]
    History(#[from] DecodeError),

    #[error("alert delivery failed: {0}")]
    Delivery(#[from] SinkError),
}
