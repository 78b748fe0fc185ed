//! # Authentication Types
//!
//! The policy engine attaches an authentication requirement to a verdict;
//! the datapath encodes it as a single byte when it raises an auth signal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication requirement attached to a policy verdict.
///
/// Decoding is total: bytes without a known assignment become
/// [`AuthType::Unknown`] and fail later with full context instead of being
/// dropped at the decode boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthType {
    /// No authentication required.
    Disabled,
    /// Mutual authentication between the two workload identities.
    Mutual,
    /// Strategy that rejects every request. Built into soak and failure
    /// testing configurations.
    AlwaysFail,
    /// Wire value this build carries no strategy for.
    Unknown(u8),
}

impl AuthType {
    pub const fn from_wire(value: u8) -> Self {
        match value {
            0 => AuthType::Disabled,
            1 => AuthType::Mutual,
            2 => AuthType::AlwaysFail,
            other => AuthType::Unknown(other),
        }
    }

    pub const fn as_wire(self) -> u8 {
        match self {
            AuthType::Disabled => 0,
            AuthType::Mutual => 1,
            AuthType::AlwaysFail => 2,
            AuthType::Unknown(value) => value,
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthType::Disabled => write!(f, "disabled"),
            AuthType::Mutual => write!(f, "mutual"),
            AuthType::AlwaysFail => write!(f, "always-fail"),
            AuthType::Unknown(value) => write!(f, "unknown({value})"),
        }
    }
}
