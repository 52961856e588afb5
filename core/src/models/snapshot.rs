use alloy::primitives::Bytes;
use alloy::sol_types::SolValue;

use super::{BlockHeight, Quantity, TargetId};
use crate::error::DecodeError;

/// Current snapshot encoding version. Bump when the layout changes.
pub const SNAPSHOT_VERSION: u8 = 1;

const SNAPSHOT_LEN: usize = 4 * 32;

alloy::sol! {
    struct SnapshotV1 {
        uint8 version;
        address target;
        uint256 quantity;
        uint64 block;
    }
}

/// One observation of the tracked quantity.
///
/// Two snapshots are only comparable when their `target` is equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub target: TargetId,
    pub quantity: Quantity,
    pub block: BlockHeight,
}

impl Snapshot {
    pub fn new(target: TargetId, quantity: Quantity, block: BlockHeight) -> Self {
        Self {
            target,
            quantity,
            block,
        }
    }

    /// Returns true when both snapshots observe the same account.
    pub fn is_comparable(&self, other: &Snapshot) -> bool {
        self.target == other.target
    }

    /// Opaque, versioned encoding suitable for handing to a history store.
    pub fn encode(&self) -> Bytes {
        SnapshotV1 {
            version: SNAPSHOT_VERSION,
            target: self.target,
            quantity: self.quantity,
            block: self.block,
        }
        .abi_encode()
        .into()
    }

    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() != SNAPSHOT_LEN {
            return Err(DecodeError::Length {
                expected: SNAPSHOT_LEN,
                actual: buf.len(),
            });
        }

        let raw = <SnapshotV1 as SolValue>::abi_decode_validate(buf)?;
        if raw.version != SNAPSHOT_VERSION {
            return Err(DecodeError::UnsupportedVersion(raw.version));
        }

        Ok(Self {
            target: raw.target,
            quantity: raw.quantity,
            block: raw.block,
        })
    }
}
