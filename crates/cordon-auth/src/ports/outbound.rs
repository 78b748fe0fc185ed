//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::key::{AuthInfo, AuthKey};
use crate::error::{HandlerError, StoreError};
use crate::events::rotation::CertificateRotationEvent;
use async_trait::async_trait;
use futures::future::BoxFuture;
use shared_identity::{AuthType, NumericIdentity};
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::SystemTime;
use tokio::sync::broadcast;

/// Shared authentication state consulted by the datapath
///
/// Implementations are safe for concurrent use but not transactional
/// across a read-then-write sequence. The coordinator tolerates the
/// resulting races; they cost at most a redundant authentication.
#[async_trait]
pub trait AuthStateStore: Send + Sync {
    /// Read the stored state for one key.
    async fn get(&self, key: &AuthKey) -> Result<Option<AuthInfo>, StoreError>;

    /// Write the state for one key, replacing any previous entry.
    async fn update(&self, key: AuthKey, info: AuthInfo) -> Result<(), StoreError>;

    /// Read every stored entry. Used by rotation fan-out.
    async fn all(&self) -> Result<HashMap<AuthKey, AuthInfo>, StoreError>;
}

/// Node ID to IP resolution
///
/// Nodes join and leave continuously, so an unresolved ID is an expected
/// transient, not a fault.
pub trait NodeIpResolver: Send + Sync {
    /// `None` when no node with this ID is currently known.
    fn get_node_ip(&self, node_id: u16) -> Option<IpAddr>;
}

/// Input to one handler invocation
#[derive(Clone, Debug)]
pub struct AuthRequest {
    pub local_identity: NumericIdentity,
    pub remote_identity: NumericIdentity,
    pub remote_node_ip: IpAddr,
}

/// Outcome of a successful handler invocation
#[derive(Clone, Copy, Debug)]
pub struct AuthResponse {
    /// Instant until which the completed authentication counts.
    pub expiration_time: SystemTime,
}

/// One authentication strategy
///
/// A handler owns the entire protocol exchange for its auth type and the
/// rotation stream for the credentials it relies on.
#[async_trait]
pub trait AuthHandler: Send + Sync {
    /// The auth type this handler serves. Stable for the handler's lifetime.
    fn auth_type(&self) -> AuthType;

    /// Run the authentication protocol for one request.
    async fn authenticate(&self, request: &AuthRequest) -> Result<AuthResponse, HandlerError>;

    /// Subscribe to rotation events for credentials this handler relies on.
    fn subscribe_to_rotated_identities(&self) -> broadcast::Receiver<CertificateRotationEvent>;
}

/// Scheduling seam for authentication units of work
///
/// The coordinator hands over fully-formed futures; the launcher decides
/// where and when they run. Implementations must not block the caller.
pub trait TaskLauncher: Send + Sync {
    fn launch(&self, work: BoxFuture<'static, ()>);
}
