use std::fmt;

use super::{BlockHeight, Quantity, TargetId};
use crate::error::DecodeError;

/// Direction of the change that raised an alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertReason {
    Drop = 0,
    Spike = 1,
}

impl AlertReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertReason::Drop => "DROP",
            AlertReason::Spike => "SPIKE",
        }
    }

    /// Wire tag used by the payload codec.
    pub fn tag(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for AlertReason {
    type Error = DecodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(AlertReason::Drop),
            1 => Ok(AlertReason::Spike),
            other => Err(DecodeError::UnknownReason(other)),
        }
    }
}

impl fmt::Display for AlertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured alert, fully determined by two snapshots and the detector
/// configuration.
///
/// `relative_change` is expressed in hundred-thousandths, i.e. units of
/// 0.001%: a value of 300 means 0.3%.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AlertRecord {
    pub reason: AlertReason,
    pub target: TargetId,
    pub previous_quantity: Quantity,
    pub current_quantity: Quantity,
    pub absolute_diff: Quantity,
    pub relative_change: Quantity,
    pub previous_block: BlockHeight,
    pub current_block: BlockHeight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_tags_round_trip() {
        for reason in [AlertReason::Drop, AlertReason::Spike] {
            assert_eq!(AlertReason::try_from(reason.tag()).unwrap(), reason);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(matches!(
            AlertReason::try_from(2),
            Err(DecodeError::UnknownReason(2))
        ));
    }

    #[test]
    fn reason_renders_as_upper_case_tag() {
        assert_eq!(AlertReason::Drop.to_string(), "DROP");
        assert_eq!(AlertReason::Spike.as_str(), "SPIKE");
    }
}
