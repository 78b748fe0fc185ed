//! Authentication keys and cached results
//!
//! An [`AuthKey`] names the relationship being authenticated: the two
//! workload identities, the node hosting the remote workload, and the
//! requested authentication type. The datapath keys its state the same way,
//! so at most one stored [`AuthInfo`] exists per key.

use serde::{Deserialize, Serialize};
use shared_identity::{AuthType, NumericIdentity};
use std::fmt;
use std::time::SystemTime;

/// Identifies one authenticated relationship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthKey {
    /// Identity of the local workload.
    pub local_identity: NumericIdentity,
    /// Identity of the remote workload.
    pub remote_identity: NumericIdentity,
    /// Datapath ID of the node hosting the remote workload.
    pub remote_node_id: u16,
    /// Authentication type requested by the policy verdict.
    pub auth_type: AuthType,
}

impl fmt::Display for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "local={} remote={} node_id={} auth_type={}",
            self.local_identity, self.remote_identity, self.remote_node_id, self.auth_type
        )
    }
}

/// Result of a completed authentication, as stored per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    /// Instant after which the authentication no longer counts.
    pub expiration: SystemTime,
}

impl AuthInfo {
    pub fn new(expiration: SystemTime) -> Self {
        Self { expiration }
    }

    /// Valid only while the expiration lies strictly in the future.
    pub fn is_valid_at(&self, now: SystemTime) -> bool {
        self.expiration > now
    }
}
