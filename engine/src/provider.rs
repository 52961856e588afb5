use async_trait::async_trait;
use corelib::{BlockHeight, Quantity, TargetId};
use thiserror::Error;

/// Quantity reading returned by a provider, pinned to the block it was
/// read at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub quantity: Quantity,
    pub as_of: BlockHeight,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider rejected request ({code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response from provider: {0}")]
    InvalidResponse(String),

    #[error("target {0} could not be resolved")]
    Unresolved(TargetId),
}

/// Source of the tracked quantity.
///
/// Implementations must fail explicitly rather than return a made-up value.
/// Timeouts and cancellation belong to the implementation; callers do not
/// retry.
#[async_trait]
pub trait QuantityProvider: Send + Sync {
    async fn get_quantity(&self, target: &TargetId) -> Result<Observation, ProviderError>;
}

#[async_trait]
impl<P: QuantityProvider + ?Sized> QuantityProvider for std::sync::Arc<P> {
    async fn get_quantity(&self, target: &TargetId) -> Result<Observation, ProviderError> {
        (**self).get_quantity(target).await
    }
}
