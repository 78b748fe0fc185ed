//! Handler registry
//!
//! Maps each auth type to the single strategy serving it. The table is
//! built once at coordinator construction and never changes afterwards, so
//! lookups are lock-free.

use crate::error::{AuthError, AuthResult};
use crate::ports::outbound::AuthHandler;
use shared_identity::AuthType;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable auth type to handler table.
pub struct HandlerRegistry {
    handlers: HashMap<AuthType, Arc<dyn AuthHandler>>,
}

impl HandlerRegistry {
    /// Build the table. Registering two handlers for the same auth type is
    /// a configuration error and fails construction.
    pub fn new(handlers: Vec<Arc<dyn AuthHandler>>) -> AuthResult<Self> {
        let mut table: HashMap<AuthType, Arc<dyn AuthHandler>> =
            HashMap::with_capacity(handlers.len());

        for handler in handlers {
            let auth_type = handler.auth_type();
            if table.insert(auth_type, handler).is_some() {
                return Err(AuthError::DuplicateHandler(auth_type));
            }
        }

        Ok(Self { handlers: table })
    }

    /// Look up the handler for an auth type.
    ///
    /// A miss is not fatal: signals may reference types this build carries
    /// no strategy for, and the attempt fails with full context instead.
    pub fn get(&self, auth_type: AuthType) -> Option<&Arc<dyn AuthHandler>> {
        self.handlers.get(&auth_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn AuthHandler>> {
        self.handlers.values()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
