//! # Numeric Security Identities
//!
//! Workloads are grouped into security identities by the control plane.
//! The datapath refers to workloads exclusively through the numeric value,
//! so it is the key everything identity-scoped hangs off.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric security identity assigned to a workload.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NumericIdentity(pub u32);

impl NumericIdentity {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for NumericIdentity {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NumericIdentity> for u32 {
    fn from(id: NumericIdentity) -> Self {
        id.0
    }
}

impl fmt::Display for NumericIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
