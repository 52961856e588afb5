use engine::ProviderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response from rpc node: {0}")]
    InvalidResponse(String),

    #[error("invalid hex quantity {0:?}")]
    InvalidQuantity(String),
}

impl From<RpcError> for ProviderError {
    fn from(e: RpcError) -> Self {
        match e {
            RpcError::Http(e) => ProviderError::Unreachable(e.to_string()),
            RpcError::Rpc { code, message } => ProviderError::Rpc { code, message },
            RpcError::InvalidResponse(msg) => ProviderError::InvalidResponse(msg),
            RpcError::InvalidQuantity(raw) => {
                ProviderError::InvalidResponse(format!("invalid hex quantity {raw:?}"))
            }
        }
    }
}
