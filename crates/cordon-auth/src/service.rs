//! Authentication Coordinator - Core business logic

use crate::domain::key::{AuthInfo, AuthKey};
use crate::domain::pending::{PendingAuthSet, PendingClaim};
use crate::error::{AuthError, AuthResult};
use crate::events::rotation::CertificateRotationEvent;
use crate::events::signal::SignalAuthKey;
use crate::metrics;
use crate::ports::inbound::AuthApi;
use crate::ports::outbound::{
    AuthHandler, AuthRequest, AuthStateStore, NodeIpResolver, TaskLauncher,
};
use crate::registry::HandlerRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Authentication coordinator
///
/// Receives datapath auth signals and certificate rotation events,
/// deduplicates concurrent attempts per key, and drives the registered
/// handler for the requested auth type. Completed results are written to
/// the shared state store the datapath consults.
///
/// Entry points never wait on a handler: accepted dispatches run as
/// independent units of work through the injected launcher, and each unit
/// holds its pending claim until it finishes.
pub struct AuthCoordinator<S, R, L>
where
    S: AuthStateStore,
    R: NodeIpResolver,
    L: TaskLauncher,
{
    handlers: Arc<HandlerRegistry>,
    store: Arc<S>,
    resolver: Arc<R>,
    launcher: Arc<L>,
    pending: Arc<PendingAuthSet>,
}

// Clones share all underlying state; S, R, L themselves need not be Clone.
impl<S, R, L> Clone for AuthCoordinator<S, R, L>
where
    S: AuthStateStore,
    R: NodeIpResolver,
    L: TaskLauncher,
{
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            store: Arc::clone(&self.store),
            resolver: Arc::clone(&self.resolver),
            launcher: Arc::clone(&self.launcher),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<S, R, L> AuthCoordinator<S, R, L>
where
    S: AuthStateStore + 'static,
    R: NodeIpResolver + 'static,
    L: TaskLauncher + 'static,
{
    /// Create a new coordinator.
    ///
    /// Fails when two handlers claim the same auth type.
    pub fn new(
        handlers: Vec<Arc<dyn AuthHandler>>,
        store: Arc<S>,
        resolver: Arc<R>,
        launcher: Arc<L>,
    ) -> AuthResult<Self> {
        Ok(Self {
            handlers: Arc::new(HandlerRegistry::new(handlers)?),
            store,
            resolver,
            launcher,
            pending: Arc::new(PendingAuthSet::new()),
        })
    }

    /// Number of attempts currently in flight.
    pub fn pending_authentications(&self) -> usize {
        self.pending.len()
    }

    /// Claim the key and launch one unit of work for it.
    ///
    /// Declines silently when an attempt for the key is already in flight.
    /// With `force_reauth` the unit skips the cached-state check and always
    /// runs the handler.
    pub fn dispatch(&self, key: AuthKey, force_reauth: bool) {
        let Some(claim) = PendingAuthSet::claim(&self.pending, key) else {
            debug!(key = %key, "Authentication already pending, skipping dispatch");
            metrics::record_dispatch_deduplicated();
            return;
        };
        metrics::set_pending_authentications(self.pending.len());

        let coordinator = self.clone();
        self.launcher.launch(Box::pin(async move {
            coordinator.run_attempt(key, force_reauth, claim).await;
        }));
    }

    /// One unit of work. Owns the pending claim for its whole lifetime.
    ///
    /// Attempt failures are logged and swallowed here; the datapath keeps
    /// signaling while the relationship stays unauthenticated, so the next
    /// signal retries.
    async fn run_attempt(&self, key: AuthKey, force_reauth: bool, claim: PendingClaim) {
        if !force_reauth && self.has_valid_entry(&key).await {
            debug!(key = %key, "Already authenticated, skipping authentication");
            metrics::record_attempt_skipped();
        } else if let Err(err) = self.authenticate(&key).await {
            warn!(key = %key, error = %err, "Failed to authenticate request");
            metrics::record_attempt_failed(err.reason_label());
        } else {
            metrics::record_attempt_succeeded();
        }

        drop(claim);
        metrics::set_pending_authentications(self.pending.len());
    }

    /// Whether a stored result exists and is still valid right now.
    ///
    /// A read failure counts as absent state: authenticating again is
    /// always safe, skipping on unverified state is not.
    async fn has_valid_entry(&self, key: &AuthKey) -> bool {
        match self.store.get(key).await {
            Ok(Some(info)) => info.is_valid_at(SystemTime::now()),
            Ok(None) => false,
            Err(source) => {
                let err = AuthError::StoreRead { key: *key, source };
                debug!(
                    key = %key,
                    error = %err,
                    "Failed to read cached authentication state, proceeding with authentication"
                );
                false
            }
        }
    }

    /// Run the full authentication protocol for one key.
    async fn authenticate(&self, key: &AuthKey) -> AuthResult<()> {
        debug!(key = %key, "Policy is requiring authentication");

        let handler = self
            .handlers
            .get(key.auth_type)
            .ok_or(AuthError::UnknownAuthType(key.auth_type))?;

        let remote_node_ip =
            self.resolver
                .get_node_ip(key.remote_node_id)
                .ok_or(AuthError::NodeIpUnavailable {
                    node_id: key.remote_node_id,
                })?;

        let request = AuthRequest {
            local_identity: key.local_identity,
            remote_identity: key.remote_identity,
            remote_node_ip,
        };

        let response = handler
            .authenticate(&request)
            .await
            .map_err(|source| AuthError::Handler {
                auth_type: key.auth_type,
                source,
            })?;

        self.store
            .update(*key, AuthInfo::new(response.expiration_time))
            .await
            .map_err(|source| AuthError::StoreWrite { source })?;

        debug!(
            key = %key,
            remote_node_ip = %remote_node_ip,
            "Successfully authenticated"
        );
        Ok(())
    }

    /// Spawn one listener task per registered handler, forwarding its
    /// rotation events into [`AuthApi::handle_certificate_rotation`].
    ///
    /// Per-event failures are logged, not propagated; a listener ends only
    /// when its handler closes the stream. The returned handles let the
    /// host supervise or abort the listeners.
    pub fn spawn_rotation_listeners(&self) -> Vec<JoinHandle<()>> {
        let mut listeners = Vec::with_capacity(self.handlers.len());

        for handler in self.handlers.iter() {
            let auth_type = handler.auth_type();
            let mut events = handler.subscribe_to_rotated_identities();
            let coordinator = self.clone();

            listeners.push(tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            if let Err(err) = coordinator.handle_certificate_rotation(event).await
                            {
                                warn!(
                                    auth_type = %auth_type,
                                    error = %err,
                                    "Failed to handle certificate rotation event"
                                );
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(count)) => {
                            warn!(
                                auth_type = %auth_type,
                                lagged = count,
                                "Rotation listener lagged, some events dropped"
                            );
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
                debug!(auth_type = %auth_type, "Rotation event stream closed");
            }));
        }

        listeners
    }
}

#[async_trait]
impl<S, R, L> AuthApi for AuthCoordinator<S, R, L>
where
    S: AuthStateStore + 'static,
    R: NodeIpResolver + 'static,
    L: TaskLauncher + 'static,
{
    async fn handle_auth_request(&self, signal: SignalAuthKey) -> AuthResult<()> {
        let key = AuthKey::from(signal);
        debug!(key = %key, "Handle authentication request");
        metrics::record_signal_received(key.auth_type);

        self.dispatch(key, false);
        Ok(())
    }

    async fn handle_certificate_rotation(
        &self,
        event: CertificateRotationEvent,
    ) -> AuthResult<()> {
        debug!(identity = %event.identity, "Handle certificate rotation event");
        metrics::record_rotation_received();

        let entries = self
            .store
            .all()
            .await
            .map_err(|source| AuthError::StoreScan { source })?;

        for key in entries.keys() {
            if key.local_identity == event.identity || key.remote_identity == event.identity {
                self.dispatch(*key, true);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryAuthStore, StaticNodeIpResolver};
    use crate::error::{HandlerError, StoreError};
    use crate::events::rotation::DEFAULT_ROTATION_CHANNEL_CAPACITY;
    use crate::ports::outbound::AuthResponse;
    use futures::future::BoxFuture;
    use parking_lot::Mutex;
    use shared_identity::{AuthType, NumericIdentity};
    use std::collections::HashMap;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::timeout;

    const REMOTE_NODE_ID: u16 = 42;

    fn remote_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(172, 16, 0, 42))
    }

    fn test_key() -> AuthKey {
        AuthKey {
            local_identity: NumericIdentity::new(1000),
            remote_identity: NumericIdentity::new(2000),
            remote_node_id: REMOTE_NODE_ID,
            auth_type: AuthType::Mutual,
        }
    }

    fn signal_for(key: AuthKey) -> SignalAuthKey {
        SignalAuthKey::new(
            key.local_identity.as_u32(),
            key.remote_identity.as_u32(),
            key.remote_node_id,
            key.auth_type.as_wire(),
        )
    }

    fn valid_info() -> AuthInfo {
        AuthInfo::new(SystemTime::now() + Duration::from_secs(300))
    }

    fn expired_info() -> AuthInfo {
        AuthInfo::new(SystemTime::now() - Duration::from_secs(1))
    }

    // Mock implementations for testing

    struct MockAuthHandler {
        auth_type: AuthType,
        fail: AtomicBool,
        calls: AtomicUsize,
        seen: Mutex<Vec<AuthRequest>>,
        validity: Duration,
        rotations: broadcast::Sender<CertificateRotationEvent>,
    }

    impl MockAuthHandler {
        fn mutual() -> Arc<Self> {
            let (rotations, _) = broadcast::channel(DEFAULT_ROTATION_CHANNEL_CAPACITY);
            Arc::new(Self {
                auth_type: AuthType::Mutual,
                fail: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                validity: Duration::from_secs(60),
                rotations,
            })
        }

        fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn seen_identities(&self) -> Vec<(NumericIdentity, NumericIdentity)> {
            self.seen
                .lock()
                .iter()
                .map(|request| (request.local_identity, request.remote_identity))
                .collect()
        }
    }

    #[async_trait]
    impl AuthHandler for MockAuthHandler {
        fn auth_type(&self) -> AuthType {
            self.auth_type
        }

        async fn authenticate(
            &self,
            request: &AuthRequest,
        ) -> Result<AuthResponse, HandlerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().push(request.clone());

            if self.fail.load(Ordering::SeqCst) {
                Err(HandlerError::new("mock handler failure"))
            } else {
                Ok(AuthResponse {
                    expiration_time: SystemTime::now() + self.validity,
                })
            }
        }

        fn subscribe_to_rotated_identities(
            &self,
        ) -> broadcast::Receiver<CertificateRotationEvent> {
            self.rotations.subscribe()
        }
    }

    /// Store wrapper with injectable failures per operation.
    struct FlakyAuthStore {
        inner: InMemoryAuthStore,
        fail_get: AtomicBool,
        fail_update: AtomicBool,
        fail_all: AtomicBool,
    }

    impl FlakyAuthStore {
        fn new() -> Self {
            Self {
                inner: InMemoryAuthStore::new(),
                fail_get: AtomicBool::new(false),
                fail_update: AtomicBool::new(false),
                fail_all: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl AuthStateStore for FlakyAuthStore {
        async fn get(&self, key: &AuthKey) -> Result<Option<AuthInfo>, StoreError> {
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(StoreError::new("injected get failure"));
            }
            self.inner.get(key).await
        }

        async fn update(&self, key: AuthKey, info: AuthInfo) -> Result<(), StoreError> {
            if self.fail_update.load(Ordering::SeqCst) {
                return Err(StoreError::new("injected update failure"));
            }
            self.inner.update(key, info).await
        }

        async fn all(&self) -> Result<HashMap<AuthKey, AuthInfo>, StoreError> {
            if self.fail_all.load(Ordering::SeqCst) {
                return Err(StoreError::new("injected all failure"));
            }
            self.inner.all().await
        }
    }

    /// Collects launched work so tests decide exactly when it runs.
    struct QueueLauncher {
        queue: Mutex<Vec<BoxFuture<'static, ()>>>,
    }

    impl QueueLauncher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                queue: Mutex::new(Vec::new()),
            })
        }

        fn queued(&self) -> usize {
            self.queue.lock().len()
        }

        /// Run queued work to completion, including work queued while
        /// draining.
        async fn drain(&self) {
            loop {
                let batch = std::mem::take(&mut *self.queue.lock());
                if batch.is_empty() {
                    break;
                }
                for work in batch {
                    work.await;
                }
            }
        }
    }

    impl TaskLauncher for QueueLauncher {
        fn launch(&self, work: BoxFuture<'static, ()>) {
            self.queue.lock().push(work);
        }
    }

    struct TestSetup {
        coordinator: AuthCoordinator<InMemoryAuthStore, StaticNodeIpResolver, QueueLauncher>,
        handler: Arc<MockAuthHandler>,
        store: Arc<InMemoryAuthStore>,
        launcher: Arc<QueueLauncher>,
    }

    fn setup() -> TestSetup {
        setup_with_resolver(StaticNodeIpResolver::with_nodes([(
            REMOTE_NODE_ID,
            remote_ip(),
        )]))
    }

    fn setup_with_resolver(resolver: StaticNodeIpResolver) -> TestSetup {
        let handler = MockAuthHandler::mutual();
        let store = Arc::new(InMemoryAuthStore::new());
        let launcher = QueueLauncher::new();

        let coordinator = AuthCoordinator::new(
            vec![handler.clone() as Arc<dyn AuthHandler>],
            Arc::clone(&store),
            Arc::new(resolver),
            Arc::clone(&launcher),
        )
        .unwrap();

        TestSetup {
            coordinator,
            handler,
            store,
            launcher,
        }
    }

    #[tokio::test]
    async fn test_signal_triggers_authentication_and_persists_result() {
        let t = setup();

        t.coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        assert_eq!(t.launcher.queued(), 1);

        t.launcher.drain().await;

        assert_eq!(t.handler.calls(), 1);
        let stored = t
            .store
            .get(&test_key())
            .await
            .unwrap()
            .expect("result stored");
        assert!(stored.is_valid_at(SystemTime::now()));
        assert_eq!(t.coordinator.pending_authentications(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_dispatch_for_same_key_collapses_to_one_attempt() {
        let t = setup();

        for _ in 0..5 {
            t.coordinator
                .handle_auth_request(signal_for(test_key()))
                .await
                .unwrap();
        }

        // The first dispatch claimed the key; the rest were declined.
        assert_eq!(t.launcher.queued(), 1);

        t.launcher.drain().await;
        assert_eq!(t.handler.calls(), 1);
        assert_eq!(t.coordinator.pending_authentications(), 0);
    }

    #[tokio::test]
    async fn test_pending_claim_released_after_failed_attempt() {
        let t = setup();
        t.handler.set_failing(true);

        t.coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        t.launcher.drain().await;

        t.coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        t.launcher.drain().await;

        assert_eq!(t.handler.calls(), 2);
        assert_eq!(t.coordinator.pending_authentications(), 0);
    }

    #[tokio::test]
    async fn test_valid_cached_state_skips_handler() {
        let t = setup();
        t.store.insert(test_key(), valid_info());

        t.coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        t.launcher.drain().await;

        assert_eq!(t.handler.calls(), 0);
        assert_eq!(t.coordinator.pending_authentications(), 0);
    }

    #[tokio::test]
    async fn test_expired_cached_state_reauthenticates() {
        let t = setup();
        t.store.insert(test_key(), expired_info());

        t.coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        t.launcher.drain().await;

        assert_eq!(t.handler.calls(), 1);
        let stored = t.store.get(&test_key()).await.unwrap().unwrap();
        assert!(stored.is_valid_at(SystemTime::now()));
    }

    #[tokio::test]
    async fn test_rotation_forces_reauthentication_despite_valid_state() {
        let t = setup();
        t.store.insert(test_key(), valid_info());

        t.coordinator
            .handle_certificate_rotation(CertificateRotationEvent::new(
                test_key().local_identity,
            ))
            .await
            .unwrap();
        t.launcher.drain().await;

        assert_eq!(t.handler.calls(), 1);
    }

    #[tokio::test]
    async fn test_rotation_dispatches_only_keys_referencing_identity() {
        let t = setup();
        let rotated = NumericIdentity::new(7777);

        let local_match = AuthKey {
            local_identity: rotated,
            remote_identity: NumericIdentity::new(1),
            remote_node_id: REMOTE_NODE_ID,
            auth_type: AuthType::Mutual,
        };
        let remote_match = AuthKey {
            local_identity: NumericIdentity::new(2),
            remote_identity: rotated,
            remote_node_id: REMOTE_NODE_ID,
            auth_type: AuthType::Mutual,
        };
        let unrelated = AuthKey {
            local_identity: NumericIdentity::new(3),
            remote_identity: NumericIdentity::new(4),
            remote_node_id: REMOTE_NODE_ID,
            auth_type: AuthType::Mutual,
        };

        t.store.insert(local_match, expired_info());
        t.store.insert(remote_match, expired_info());
        t.store.insert(unrelated, expired_info());

        t.coordinator
            .handle_certificate_rotation(CertificateRotationEvent::new(rotated))
            .await
            .unwrap();
        t.launcher.drain().await;

        assert_eq!(t.handler.calls(), 2);
        let seen = t.handler.seen_identities();
        assert!(seen.contains(&(local_match.local_identity, local_match.remote_identity)));
        assert!(seen.contains(&(remote_match.local_identity, remote_match.remote_identity)));
    }

    #[tokio::test]
    async fn test_rotation_scan_continues_past_key_already_in_flight() {
        let t = setup();
        let rotated = NumericIdentity::new(7777);

        let in_flight = AuthKey {
            local_identity: rotated,
            remote_identity: NumericIdentity::new(1),
            remote_node_id: REMOTE_NODE_ID,
            auth_type: AuthType::Mutual,
        };
        let idle = AuthKey {
            local_identity: NumericIdentity::new(2),
            remote_identity: rotated,
            remote_node_id: REMOTE_NODE_ID,
            auth_type: AuthType::Mutual,
        };

        t.store.insert(in_flight, expired_info());
        t.store.insert(idle, expired_info());

        // A signal claims the first key; its unit of work stays queued.
        t.coordinator
            .handle_auth_request(signal_for(in_flight))
            .await
            .unwrap();
        assert_eq!(t.launcher.queued(), 1);

        t.coordinator
            .handle_certificate_rotation(CertificateRotationEvent::new(rotated))
            .await
            .unwrap();

        // The claimed key was declined; the scan still dispatched the rest.
        assert_eq!(t.launcher.queued(), 2);

        t.launcher.drain().await;
        assert_eq!(t.handler.calls(), 2);
        let seen = t.handler.seen_identities();
        assert!(seen.contains(&(in_flight.local_identity, in_flight.remote_identity)));
        assert!(seen.contains(&(idle.local_identity, idle.remote_identity)));
        assert_eq!(t.coordinator.pending_authentications(), 0);
    }

    #[tokio::test]
    async fn test_rotation_bulk_read_failure_propagates() {
        let handler = MockAuthHandler::mutual();
        let store = Arc::new(FlakyAuthStore::new());
        store.fail_all.store(true, Ordering::SeqCst);
        let launcher = QueueLauncher::new();

        let coordinator = AuthCoordinator::new(
            vec![handler.clone() as Arc<dyn AuthHandler>],
            Arc::clone(&store),
            Arc::new(StaticNodeIpResolver::new()),
            Arc::clone(&launcher),
        )
        .unwrap();

        let result = coordinator
            .handle_certificate_rotation(CertificateRotationEvent::new(NumericIdentity::new(1)))
            .await;

        assert!(matches!(result, Err(AuthError::StoreScan { .. })));
        assert_eq!(launcher.queued(), 0);
    }

    #[tokio::test]
    async fn test_unknown_auth_type_fails_attempt_without_panic() {
        let t = setup();
        let signal = SignalAuthKey::new(1000, 2000, REMOTE_NODE_ID, 9);

        t.coordinator.handle_auth_request(signal).await.unwrap();
        t.launcher.drain().await;

        assert_eq!(t.handler.calls(), 0);
        assert!(t.store.is_empty());
        assert_eq!(t.coordinator.pending_authentications(), 0);
    }

    #[tokio::test]
    async fn test_unresolved_node_ip_aborts_before_handler() {
        let t = setup_with_resolver(StaticNodeIpResolver::new());

        t.coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        t.launcher.drain().await;

        assert_eq!(t.handler.calls(), 0);
        assert!(t.store.is_empty());
        assert_eq!(t.coordinator.pending_authentications(), 0);
    }

    #[tokio::test]
    async fn test_handler_failure_leaves_store_unchanged_and_allows_retry() {
        let t = setup();
        t.handler.set_failing(true);

        t.coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        t.launcher.drain().await;

        assert!(t.store.is_empty());

        t.handler.set_failing(false);
        t.coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        t.launcher.drain().await;

        assert_eq!(t.handler.calls(), 2);
        assert!(t.store.get(&test_key()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_store_write_failure_fails_attempt_and_releases_claim() {
        let handler = MockAuthHandler::mutual();
        let store = Arc::new(FlakyAuthStore::new());
        store.fail_update.store(true, Ordering::SeqCst);
        let launcher = QueueLauncher::new();

        let coordinator = AuthCoordinator::new(
            vec![handler.clone() as Arc<dyn AuthHandler>],
            Arc::clone(&store),
            Arc::new(StaticNodeIpResolver::with_nodes([(
                REMOTE_NODE_ID,
                remote_ip(),
            )])),
            Arc::clone(&launcher),
        )
        .unwrap();

        coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        launcher.drain().await;

        // The handshake ran but nothing was persisted.
        assert_eq!(handler.calls(), 1);
        assert!(store.inner.is_empty());
        assert_eq!(coordinator.pending_authentications(), 0);

        // A later signal retries once the store recovers.
        store.fail_update.store(false, Ordering::SeqCst);
        coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        launcher.drain().await;

        assert_eq!(handler.calls(), 2);
        assert!(!store.inner.is_empty());
    }

    #[tokio::test]
    async fn test_store_read_failure_proceeds_with_authentication() {
        let handler = MockAuthHandler::mutual();
        let store = Arc::new(FlakyAuthStore::new());
        // A valid entry exists but cannot be read; the attempt must not
        // trust it.
        store.inner.insert(test_key(), valid_info());
        store.fail_get.store(true, Ordering::SeqCst);
        let launcher = QueueLauncher::new();

        let coordinator = AuthCoordinator::new(
            vec![handler.clone() as Arc<dyn AuthHandler>],
            Arc::clone(&store),
            Arc::new(StaticNodeIpResolver::with_nodes([(
                REMOTE_NODE_ID,
                remote_ip(),
            )])),
            Arc::clone(&launcher),
        )
        .unwrap();

        coordinator
            .handle_auth_request(signal_for(test_key()))
            .await
            .unwrap();
        launcher.drain().await;

        assert_eq!(handler.calls(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_handler_registration_fails_construction() {
        let result = AuthCoordinator::new(
            vec![
                MockAuthHandler::mutual() as Arc<dyn AuthHandler>,
                MockAuthHandler::mutual() as Arc<dyn AuthHandler>,
            ],
            Arc::new(InMemoryAuthStore::new()),
            Arc::new(StaticNodeIpResolver::new()),
            QueueLauncher::new(),
        );

        assert!(matches!(
            result,
            Err(AuthError::DuplicateHandler(AuthType::Mutual))
        ));
    }

    #[tokio::test]
    async fn test_rotation_listener_forwards_events() {
        let t = setup();
        t.store.insert(test_key(), expired_info());

        let listeners = t.coordinator.spawn_rotation_listeners();
        assert_eq!(listeners.len(), 1);

        t.handler
            .rotations
            .send(CertificateRotationEvent::new(test_key().remote_identity))
            .unwrap();

        timeout(Duration::from_secs(1), async {
            while t.launcher.queued() == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("listener should dispatch within timeout");

        t.launcher.drain().await;
        assert_eq!(t.handler.calls(), 1);

        for listener in listeners {
            listener.abort();
        }
    }
}
