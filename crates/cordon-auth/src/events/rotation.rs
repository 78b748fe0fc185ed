//! Certificate rotation events
//!
//! Handlers watch their credential source and publish an event whenever the
//! certificate backing an identity is reissued. Every relationship that
//! involved the identity must re-authenticate before the old credential is
//! relied on again.

use serde::{Deserialize, Serialize};
use shared_identity::NumericIdentity;

/// Default capacity for handler rotation broadcast channels.
///
/// Rotations are low-frequency; a lagged listener logs and catches up.
pub const DEFAULT_ROTATION_CHANNEL_CAPACITY: usize = 64;

/// Notification that the credential backing an identity was reissued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRotationEvent {
    /// Identity whose certificate was rotated.
    pub identity: NumericIdentity,
}

impl CertificateRotationEvent {
    pub fn new(identity: NumericIdentity) -> Self {
        Self { identity }
    }
}
