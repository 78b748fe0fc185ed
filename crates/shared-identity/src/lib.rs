//! # Shared Identity Crate
//!
//! Cross-subsystem identity vocabulary: the numeric security identities
//! assigned to workloads and the authentication types the datapath can
//! request for a connection between two of them.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Every subsystem that names an identity or
//!   an authentication type uses these definitions.
//! - **Total Decoding**: Wire values coming from the datapath always decode
//!   to a value; unrecognized bytes are preserved rather than rejected so
//!   the consuming subsystem can report them with full context.

pub mod identity;
pub mod policy;

pub use identity::NumericIdentity;
pub use policy::AuthType;
