//! Ethereum JSON-RPC balance source.
//!
//! Reads the block height first and then the balance *at that height*, so
//! a snapshot never pairs a balance with a block it was not read at.

pub mod client;
pub mod errors;
pub mod provider;
pub mod types;

pub use client::RpcClient;
pub use errors::RpcError;
pub use provider::RpcBalanceProvider;
