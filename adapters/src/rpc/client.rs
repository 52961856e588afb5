use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy::primitives::{Address, U256};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use super::errors::RpcError;
use super::types::{
    JsonRpcRequest, JsonRpcResponse, format_block_number, parse_block_number, parse_quantity,
};

/// Minimal Ethereum JSON-RPC client over HTTP.
pub struct RpcClient {
    http: Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: String) -> Result<Self, RpcError> {
        Self::with_timeout(url, Duration::from_secs(5))
    }

    pub fn with_timeout(url: String, timeout: Duration) -> Result<Self, RpcError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let req = JsonRpcRequest::new(id, method, params);

        let resp = self
            .http
            .post(&self.url)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;

        let envelope: JsonRpcResponse<T> = resp.json().await?;
        envelope.into_result()
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn block_number(&self) -> Result<u64, RpcError> {
        let raw: String = self.call("eth_blockNumber", json!([])).await?;
        parse_block_number(&raw)
    }

    #[instrument(skip(self), fields(account = %address), level = "debug")]
    pub async fn balance_at(&self, address: Address, block: u64) -> Result<U256, RpcError> {
        let raw: String = self
            .call(
                "eth_getBalance",
                json!([address.to_string(), format_block_number(block)]),
            )
            .await?;

        let balance = parse_quantity(&raw)?;
        debug!(%balance, block, "balance fetched");

        Ok(balance)
    }
}
