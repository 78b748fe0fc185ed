//! # Authentication Metrics
//!
//! Prometheus metrics for monitoring authentication throughput and health.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! cordon-auth = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `auth_signals_received_total` - Counter of datapath auth signals (by auth type)
//! - `auth_rotations_received_total` - Counter of certificate rotation events
//! - `auth_dispatches_deduplicated_total` - Counter of dispatches declined by the pending set
//! - `auth_attempts_skipped_total` - Counter of attempts skipped due to valid cached state
//! - `auth_attempts_succeeded_total` - Counter of completed authentications
//! - `auth_attempts_failed_total` - Counter of failed attempts (by reason)
//! - `auth_pending_authentications` - Gauge of currently in-flight attempts

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_gauge, register_int_counter, CounterVec, Gauge, IntCounter,
};

use shared_identity::AuthType;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total datapath auth signals received, labeled by auth type
    pub static ref SIGNALS_RECEIVED: CounterVec = register_counter_vec!(
        "auth_signals_received_total",
        "Total number of datapath authentication signals received",
        &["auth_type"]
    )
    .expect("Failed to create SIGNALS_RECEIVED metric");

    /// Total certificate rotation events received
    pub static ref ROTATIONS_RECEIVED: IntCounter = register_int_counter!(
        "auth_rotations_received_total",
        "Total number of certificate rotation events received"
    )
    .expect("Failed to create ROTATIONS_RECEIVED metric");

    /// Total dispatches declined because an attempt was already in flight
    pub static ref DISPATCHES_DEDUPLICATED: IntCounter = register_int_counter!(
        "auth_dispatches_deduplicated_total",
        "Total number of dispatches declined by the pending set"
    )
    .expect("Failed to create DISPATCHES_DEDUPLICATED metric");

    /// Total attempts skipped because stored state was still valid
    pub static ref ATTEMPTS_SKIPPED: IntCounter = register_int_counter!(
        "auth_attempts_skipped_total",
        "Total number of attempts skipped due to valid cached state"
    )
    .expect("Failed to create ATTEMPTS_SKIPPED metric");

    /// Total completed authentications
    pub static ref ATTEMPTS_SUCCEEDED: IntCounter = register_int_counter!(
        "auth_attempts_succeeded_total",
        "Total number of completed authentications"
    )
    .expect("Failed to create ATTEMPTS_SUCCEEDED metric");

    /// Total failed attempts, labeled by reason
    pub static ref ATTEMPTS_FAILED: CounterVec = register_counter_vec!(
        "auth_attempts_failed_total",
        "Total number of failed authentication attempts",
        &["reason"]
    )
    .expect("Failed to create ATTEMPTS_FAILED metric");

    /// Currently in-flight attempts
    pub static ref PENDING_AUTHENTICATIONS: Gauge = register_gauge!(
        "auth_pending_authentications",
        "Number of authentication attempts currently in flight"
    )
    .expect("Failed to create PENDING_AUTHENTICATIONS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a datapath auth signal
#[cfg(feature = "metrics")]
pub fn record_signal_received(auth_type: AuthType) {
    SIGNALS_RECEIVED
        .with_label_values(&[&auth_type.to_string()])
        .inc();
}

/// Record a certificate rotation event
#[cfg(feature = "metrics")]
pub fn record_rotation_received() {
    ROTATIONS_RECEIVED.inc();
}

/// Record a dispatch declined by the pending set
#[cfg(feature = "metrics")]
pub fn record_dispatch_deduplicated() {
    DISPATCHES_DEDUPLICATED.inc();
}

/// Record an attempt skipped due to valid cached state
#[cfg(feature = "metrics")]
pub fn record_attempt_skipped() {
    ATTEMPTS_SKIPPED.inc();
}

/// Record a completed authentication
#[cfg(feature = "metrics")]
pub fn record_attempt_succeeded() {
    ATTEMPTS_SUCCEEDED.inc();
}

/// Record a failed attempt with reason
#[cfg(feature = "metrics")]
pub fn record_attempt_failed(reason: &str) {
    ATTEMPTS_FAILED.with_label_values(&[reason]).inc();
}

/// Update the in-flight attempts gauge
#[cfg(feature = "metrics")]
pub fn set_pending_authentications(count: usize) {
    PENDING_AUTHENTICATIONS.set(count as f64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_signal_received(_auth_type: AuthType) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rotation_received() {}

#[cfg(not(feature = "metrics"))]
pub fn record_dispatch_deduplicated() {}

#[cfg(not(feature = "metrics"))]
pub fn record_attempt_skipped() {}

#[cfg(not(feature = "metrics"))]
pub fn record_attempt_succeeded() {}

#[cfg(not(feature = "metrics"))]
pub fn record_attempt_failed(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_pending_authentications(_count: usize) {}
