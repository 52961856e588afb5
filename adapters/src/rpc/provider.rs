use async_trait::async_trait;
use corelib::TargetId;
use engine::{Observation, ProviderError, QuantityProvider};

use super::client::RpcClient;

/// [`QuantityProvider`] backed by an Ethereum node: the tracked quantity is
/// the account's native balance.
pub struct RpcBalanceProvider {
    client: RpcClient,
}

impl RpcBalanceProvider {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuantityProvider for RpcBalanceProvider {
    async fn get_quantity(&self, target: &TargetId) -> Result<Observation, ProviderError> {
        let as_of = self.client.block_number().await?;
        let quantity = self.client.balance_at(*target, as_of).await?;

        Ok(Observation { quantity, as_of })
    }
}
