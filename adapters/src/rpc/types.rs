use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use super::errors::RpcError;

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<JsonRpcErrorObject>,
}

impl<T> JsonRpcResponse<T> {
    /// An error object wins over a result; a response with neither is invalid.
    pub fn into_result(self) -> Result<T, RpcError> {
        if let Some(err) = self.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        self.result
            .ok_or_else(|| RpcError::InvalidResponse("missing result".into()))
    }
}

fn hex_digits(raw: &str) -> Result<&str, RpcError> {
    match raw.strip_prefix("0x") {
        Some(d) if !d.is_empty() => Ok(d),
        _ => Err(RpcError::InvalidQuantity(raw.to_string())),
    }
}

/// Parses a JSON-RPC `QUANTITY` (`0x`-prefixed big-endian hex).
pub fn parse_quantity(raw: &str) -> Result<U256, RpcError> {
    U256::from_str_radix(hex_digits(raw)?, 16)
        .map_err(|_| RpcError::InvalidQuantity(raw.to_string()))
}

pub fn parse_block_number(raw: &str) -> Result<u64, RpcError> {
    u64::from_str_radix(hex_digits(raw)?, 16)
        .map_err(|_| RpcError::InvalidQuantity(raw.to_string()))
}

pub fn format_block_number(block: u64) -> String {
    format!("{block:#x}")
}
