//! Events module for the authentication subsystem

pub mod rotation;
pub mod signal;

pub use rotation::{CertificateRotationEvent, DEFAULT_ROTATION_CHANNEL_CAPACITY};
pub use signal::{SignalAuthKey, SIGNAL_AUTH_KEY_SIZE};
