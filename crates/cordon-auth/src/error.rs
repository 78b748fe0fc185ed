//! Error types for the authentication subsystem

use crate::domain::key::AuthKey;
use shared_identity::AuthType;
use thiserror::Error;

/// Authentication subsystem errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Two handlers registered for the same auth type
    #[error("multiple handlers for auth type: {0}")]
    DuplicateHandler(AuthType),

    /// Signal referenced an auth type without a registered handler
    #[error("unknown requested auth type: {0}")]
    UnknownAuthType(AuthType),

    /// Remote node ID could not be resolved to an IP address
    #[error("remote node IP not available for node ID {node_id}")]
    NodeIpUnavailable { node_id: u16 },

    /// Handler rejected or failed the authentication exchange
    #[error("failed to authenticate with auth type {auth_type}: {source}")]
    Handler {
        auth_type: AuthType,
        #[source]
        source: HandlerError,
    },

    /// Cached authentication state could not be read
    #[error("failed to read authentication state for {key}: {source}")]
    StoreRead {
        key: AuthKey,
        #[source]
        source: StoreError,
    },

    /// Authentication result could not be persisted
    #[error("failed to write authentication state: {source}")]
    StoreWrite {
        #[source]
        source: StoreError,
    },

    /// Bulk read of stored authentication state failed
    #[error("failed to read all authentication state entries: {source}")]
    StoreScan {
        #[source]
        source: StoreError,
    },
}

impl AuthError {
    /// Low-cardinality label for failure counters.
    pub fn reason_label(&self) -> &'static str {
        match self {
            AuthError::DuplicateHandler(_) => "duplicate_handler",
            AuthError::UnknownAuthType(_) => "unknown_auth_type",
            AuthError::NodeIpUnavailable { .. } => "node_ip_unavailable",
            AuthError::Handler { .. } => "handler",
            AuthError::StoreRead { .. } => "store_read",
            AuthError::StoreWrite { .. } => "store_write",
            AuthError::StoreScan { .. } => "store_scan",
        }
    }
}

/// Failure reported by an authentication state store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct StoreError {
    pub reason: String,
}

impl StoreError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure reported by an authentication handler
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct HandlerError {
    pub reason: String,
}

impl HandlerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
