//! Domain module for the authentication subsystem
//!
//! ## Core Modules
//! - key: authentication keys and cached results
//! - pending: in-flight attempt tracking

pub mod key;
pub mod pending;

pub use key::{AuthInfo, AuthKey};
pub use pending::{PendingAuthSet, PendingClaim};
