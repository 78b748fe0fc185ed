//! Ports module for the authentication subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::AuthApi;
pub use outbound::{AuthHandler, AuthStateStore, NodeIpResolver, TaskLauncher};
