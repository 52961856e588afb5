//! Alert payload codec.
//!
//! The payload is the Solidity ABI encoding of a static tuple, so it can be
//! produced and consumed on either side of a chain boundary:
//!
//! ```text
//! (uint8 reason, address target,
//!  uint256 previousQuantity, uint256 currentQuantity,
//!  uint256 absoluteDiff, uint256 relativeChange,
//!  uint64 previousBlock, uint64 currentBlock)
//! ```
//!
//! Every field occupies one 32-byte word; a valid payload is exactly
//! [`ALERT_PAYLOAD_LEN`] bytes. Field order is part of the contract.

use alloy::hex;
use alloy::primitives::Bytes;
use alloy::sol_types::SolValue;

use crate::error::DecodeError;
use crate::models::{AlertReason, AlertRecord};

/// Encoded size of an alert payload in bytes.
pub const ALERT_PAYLOAD_LEN: usize = 8 * 32;

alloy::sol! {
    struct AlertPayload {
        uint8 reason;
        address target;
        uint256 previousQuantity;
        uint256 currentQuantity;
        uint256 absoluteDiff;
        uint256 relativeChange;
        uint64 previousBlock;
        uint64 currentBlock;
    }
}

impl From<&AlertRecord> for AlertPayload {
    fn from(r: &AlertRecord) -> Self {
        Self {
            reason: r.reason.tag(),
            target: r.target,
            previousQuantity: r.previous_quantity,
            currentQuantity: r.current_quantity,
            absoluteDiff: r.absolute_diff,
            relativeChange: r.relative_change,
            previousBlock: r.previous_block,
            currentBlock: r.current_block,
        }
    }
}

impl TryFrom<AlertPayload> for AlertRecord {
    type Error = DecodeError;

    fn try_from(p: AlertPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            reason: AlertReason::try_from(p.reason)?,
            target: p.target,
            previous_quantity: p.previousQuantity,
            current_quantity: p.currentQuantity,
            absolute_diff: p.absoluteDiff,
            relative_change: p.relativeChange,
            previous_block: p.previousBlock,
            current_block: p.currentBlock,
        })
    }
}

pub fn encode(record: &AlertRecord) -> Bytes {
    AlertPayload::from(record).abi_encode().into()
}

/// Decodes a payload produced by [`encode`].
///
/// Fails on wrong length, non-canonical words (dirty padding, values that
/// do not fit their declared width) and unknown reason tags.
pub fn decode(buf: &[u8]) -> Result<AlertRecord, DecodeError> {
    if buf.len() != ALERT_PAYLOAD_LEN {
        return Err(DecodeError::Length {
            expected: ALERT_PAYLOAD_LEN,
            actual: buf.len(),
        });
    }

    let raw = <AlertPayload as SolValue>::abi_decode_validate(buf)?;
    AlertRecord::try_from(raw)
}

/// `0x`-prefixed hex rendering of an encoded payload.
pub fn to_hex(buf: &[u8]) -> String {
    hex::encode_prefixed(buf)
}

/// Decodes a hex string (with or without `0x`) into an alert record.
pub fn decode_hex(s: &str) -> Result<AlertRecord, DecodeError> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let buf = hex::decode(s)?;
    decode(&buf)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use proptest::prelude::*;

    fn u256() -> impl Strategy<Value = U256> {
        any::<[u8; 32]>().prop_map(|b| U256::from_be_bytes(b))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn decode_inverts_encode(
            drop in any::<bool>(),
            target in any::<[u8; 20]>(),
            previous in u256(),
            current in u256(),
            diff in u256(),
            change in u256(),
            previous_block in any::<u64>(),
            current_block in any::<u64>(),
        ) {
            let r = AlertRecord {
                reason: if drop { AlertReason::Drop } else { AlertReason::Spike },
                target: Address::from(target),
                previous_quantity: previous,
                current_quantity: current,
                absolute_diff: diff,
                relative_change: change,
                previous_block,
                current_block,
            };

            prop_assert_eq!(decode(&encode(&r)).unwrap(), r);
        }
    }
}
