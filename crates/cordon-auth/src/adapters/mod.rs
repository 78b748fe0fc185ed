//! Adapters module for the authentication subsystem
//!
//! Implementations of the outbound ports: the tokio launcher used in
//! production, the always-fail strategy for negative testing, and the
//! in-memory store and resolver backing tests and local runs.

pub mod always_fail;
pub mod launcher;
pub mod memory_store;
pub mod resolver;

pub use always_fail::AlwaysFailAuthHandler;
pub use launcher::TokioTaskLauncher;
pub use memory_store::InMemoryAuthStore;
pub use resolver::StaticNodeIpResolver;
