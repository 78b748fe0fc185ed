//! Driving Ports (API - Inbound)

use crate::error::AuthResult;
use crate::events::rotation::CertificateRotationEvent;
use crate::events::signal::SignalAuthKey;
use async_trait::async_trait;

/// Primary authentication API
///
/// This is the driving port for the authentication subsystem. It receives
/// datapath auth signals and certificate rotation events and turns them
/// into authentication attempts.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Handle an authentication request raised by the datapath.
    ///
    /// The signal's encoding comes from a trusted datapath component, so
    /// there is no decode failure path here. Dispatch is fire-and-forget;
    /// this call never waits for the authentication itself and always
    /// returns `Ok`.
    async fn handle_auth_request(&self, signal: SignalAuthKey) -> AuthResult<()>;

    /// Re-authenticate every stored relationship involving the rotated
    /// identity.
    ///
    /// Fails only when the stored state cannot be enumerated; individual
    /// re-authentication attempts run independently and report their own
    /// failures.
    async fn handle_certificate_rotation(
        &self,
        event: CertificateRotationEvent,
    ) -> AuthResult<()>;
}
