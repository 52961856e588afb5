use thiserror::Error;

/// Failure to turn bytes back into a snapshot or alert record.
///
/// Decoding never substitutes defaults: any structural problem is one of
/// these variants.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid payload length: expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("abi decode failed: {0}")]
    Abi(#[from] alloy::sol_types::Error),

    #[error("unknown alert reason tag {0}")]
    UnknownReason(u8),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u8),

    #[error("invalid hex: {0}")]
    Hex(#[from] alloy::hex::FromHexError),
}
