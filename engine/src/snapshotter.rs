use corelib::{Snapshot, TargetId};
use tracing::{debug, instrument};

use crate::provider::{ProviderError, QuantityProvider};

/// Captures snapshots for one statically configured target.
#[derive(Clone, Copy, Debug)]
pub struct Snapshotter {
    target: TargetId,
}

impl Snapshotter {
    pub fn new(target: TargetId) -> Self {
        Self { target }
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Reads the current quantity and block from `provider`.
    ///
    /// Provider failures are returned as-is; no retry happens here.
    #[instrument(skip(self, provider), fields(account = %self.target), level = "debug")]
    pub async fn capture<P>(&self, provider: &P) -> Result<Snapshot, ProviderError>
    where
        P: QuantityProvider + ?Sized,
    {
        let obs = provider.get_quantity(&self.target).await?;

        debug!(quantity = %obs.quantity, block = obs.as_of, "snapshot captured");

        Ok(Snapshot::new(self.target, obs.quantity, obs.as_of))
    }
}
