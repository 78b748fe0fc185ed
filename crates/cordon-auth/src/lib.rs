//! # cordon-auth
//!
//! Mutual authentication coordinator for identity-aware network policy
//! enforcement.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Signal handling**: Datapath auth signals become authentication attempts
//! - **Per-key dedup**: At most one in-flight attempt per authentication key
//! - **Pluggable strategies**: One handler per auth type, resolved at dispatch
//! - **Rotation fan-out**: Certificate rotations force re-authentication of
//!   every stored relationship involving the rotated identity
//!
//! ## Architecture
//!
//! ```text
//! Datapath ──SignalAuthKey──→ Coordinator ──AuthRequest──→ AuthHandler
//!                                 │                             │
//!                                 │←───────AuthResponse─────────┘
//!                                 │
//!                                 └──AuthInfo──→ AuthStateStore ──→ Datapath
//!
//! AuthHandler ──CertificateRotationEvent──→ Coordinator (forced re-auth)
//! ```
//!
//! Entry points never wait on a handler: each accepted dispatch runs as an
//! independent unit of work through the injected [`ports::outbound::TaskLauncher`],
//! gated by the pending set so concurrent signals for one key collapse into
//! a single attempt.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cordon_auth::adapters::{InMemoryAuthStore, StaticNodeIpResolver, TokioTaskLauncher};
//! use cordon_auth::ports::inbound::AuthApi;
//! use cordon_auth::AuthCoordinator;
//!
//! let coordinator = AuthCoordinator::new(
//!     vec![mutual_handler],
//!     store,
//!     resolver,
//!     Arc::new(TokioTaskLauncher::unbounded()),
//! )?;
//!
//! // Forward datapath signals
//! coordinator.handle_auth_request(signal).await?;
//!
//! // Consume handler rotation streams
//! let listeners = coordinator.spawn_rotation_listeners();
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod registry;
pub mod service;

pub use domain::key::{AuthInfo, AuthKey};
pub use domain::pending::{PendingAuthSet, PendingClaim};
pub use error::{AuthError, AuthResult, HandlerError, StoreError};
pub use events::rotation::{CertificateRotationEvent, DEFAULT_ROTATION_CHANNEL_CAPACITY};
pub use events::signal::{SignalAuthKey, SIGNAL_AUTH_KEY_SIZE};
pub use ports::inbound::AuthApi;
pub use ports::outbound::{
    AuthHandler, AuthRequest, AuthResponse, AuthStateStore, NodeIpResolver, TaskLauncher,
};
pub use registry::HandlerRegistry;
pub use service::AuthCoordinator;
