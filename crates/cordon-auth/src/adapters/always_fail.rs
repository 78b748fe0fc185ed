use crate::error::HandlerError;
use crate::events::rotation::{CertificateRotationEvent, DEFAULT_ROTATION_CHANNEL_CAPACITY};
use crate::ports::outbound::{AuthHandler, AuthRequest, AuthResponse};
use async_trait::async_trait;
use shared_identity::AuthType;
use tokio::sync::broadcast;

/// Strategy that rejects every authentication request.
///
/// Wired into soak and failure testing configurations to exercise the
/// failure path end to end. Publishes no rotation events.
pub struct AlwaysFailAuthHandler {
    rotations: broadcast::Sender<CertificateRotationEvent>,
}

impl AlwaysFailAuthHandler {
    pub fn new() -> Self {
        let (rotations, _) = broadcast::channel(DEFAULT_ROTATION_CHANNEL_CAPACITY);
        Self { rotations }
    }
}

impl Default for AlwaysFailAuthHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthHandler for AlwaysFailAuthHandler {
    fn auth_type(&self) -> AuthType {
        AuthType::AlwaysFail
    }

    async fn authenticate(&self, _request: &AuthRequest) -> Result<AuthResponse, HandlerError> {
        Err(HandlerError::new(
            "authentication rejected by the always-fail handler",
        ))
    }

    fn subscribe_to_rotated_identities(&self) -> broadcast::Receiver<CertificateRotationEvent> {
        self.rotations.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_identity::NumericIdentity;
    use std::net::{IpAddr, Ipv4Addr};

    #[tokio::test]
    async fn test_every_request_is_rejected() {
        let handler = AlwaysFailAuthHandler::new();
        let request = AuthRequest {
            local_identity: NumericIdentity::new(1),
            remote_identity: NumericIdentity::new(2),
            remote_node_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        assert_eq!(handler.auth_type(), AuthType::AlwaysFail);
        assert!(handler.authenticate(&request).await.is_err());
    }

    #[tokio::test]
    async fn test_rotation_stream_stays_open_and_silent() {
        let handler = AlwaysFailAuthHandler::new();
        let mut events = handler.subscribe_to_rotated_identities();

        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
