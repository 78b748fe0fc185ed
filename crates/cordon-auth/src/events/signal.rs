//! Datapath authentication signal
//!
//! When a policy verdict requires authentication that has not happened yet,
//! the datapath raises a signal carrying the key of the relationship. The
//! payload mirrors the datapath `auth_key` struct byte for byte.

use crate::domain::key::AuthKey;
use shared_identity::{AuthType, NumericIdentity};
use std::fmt;

/// Size in bytes of the datapath auth signal payload.
pub const SIGNAL_AUTH_KEY_SIZE: usize = 12;

/// Raw authentication request raised by the datapath.
///
/// Field order and widths match the datapath struct; integers are
/// little-endian on the wire. The trailing pad byte keeps the record at
/// 12 bytes and carries no meaning.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalAuthKey {
    pub local_identity: u32,
    pub remote_identity: u32,
    pub remote_node_id: u16,
    pub auth_type: u8,
    pub pad: u8,
}

impl SignalAuthKey {
    pub fn new(local_identity: u32, remote_identity: u32, remote_node_id: u16, auth_type: u8) -> Self {
        Self {
            local_identity,
            remote_identity,
            remote_node_id,
            auth_type,
            pad: 0,
        }
    }

    pub fn from_bytes(bytes: [u8; SIGNAL_AUTH_KEY_SIZE]) -> Self {
        Self {
            local_identity: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            remote_identity: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            remote_node_id: u16::from_le_bytes([bytes[8], bytes[9]]),
            auth_type: bytes[10],
            pad: bytes[11],
        }
    }

    pub fn to_bytes(&self) -> [u8; SIGNAL_AUTH_KEY_SIZE] {
        let mut bytes = [0u8; SIGNAL_AUTH_KEY_SIZE];
        bytes[0..4].copy_from_slice(&self.local_identity.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.remote_identity.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.remote_node_id.to_le_bytes());
        bytes[10] = self.auth_type;
        bytes[11] = self.pad;
        bytes
    }
}

/// Low-cardinality form for metric labels: the auth type name only.
impl fmt::Display for SignalAuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AuthType::from_wire(self.auth_type))
    }
}

impl From<SignalAuthKey> for AuthKey {
    fn from(signal: SignalAuthKey) -> Self {
        AuthKey {
            local_identity: NumericIdentity::new(signal.local_identity),
            remote_identity: NumericIdentity::new(signal.remote_identity),
            remote_node_id: signal.remote_node_id,
            auth_type: AuthType::from_wire(signal.auth_type),
        }
    }
}
