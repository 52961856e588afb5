pub mod rpc;

pub use rpc::{RpcBalanceProvider, RpcClient, RpcError};
