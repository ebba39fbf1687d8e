//! Port traits: what the monitoring core needs from the outside world.
//!
//! ```text
//!   MonitorSession (domain) ──▶ Port trait ──▶ Adapter
//! ```
//!
//! Driven adapters (chat notifier, ledger recorder, event sinks, config
//! storage, clocks) implement these traits. The
//! [`MonitorSession`](super::service::MonitorSession) consumes them via
//! generics, so the domain core never performs I/O directly.
//!
//! ## Failure contract
//!
//! - [`NotificationPort`] and [`LedgerPort`] failures are non-fatal. The
//!   session reports them as notices and carries on.
//! - [`LedgerPort`] implementations MUST bound every wait. A recorder that
//!   cannot confirm within its timeout returns
//!   [`LedgerError::ConfirmationTimeout`] instead of blocking the session.
//! - [`ConfigPort`] implementations MUST validate before persisting.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::SystemConfig;
use crate::error::{ConfigError, LedgerError, NotifyError};

// ───────────────────────────────────────────────────────────────
// Notification channel (domain → chat endpoint)
// ───────────────────────────────────────────────────────────────

/// Delivers a short UTF-8 text (possibly multi-line) to an external
/// messaging endpoint.
pub trait NotificationPort {
    fn notify(&mut self, message: &str) -> Result<(), NotifyError>;
}

/// An absent notifier behaves as a disabled one.
impl<T: NotificationPort> NotificationPort for Option<T> {
    fn notify(&mut self, message: &str) -> Result<(), NotifyError> {
        match self {
            Some(inner) => inner.notify(message),
            None => Err(NotifyError::Disabled),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Ledger recorder (domain → append-only transaction log)
// ───────────────────────────────────────────────────────────────

/// What the ledger reports back for one confirmed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerReceipt {
    pub block_number: u64,
    /// 0x-prefixed transaction hash.
    pub tx_hash: String,
}

/// Reference to a message that reached the ledger, stamped by the
/// session's [`Clock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRecord {
    pub block_number: u64,
    /// 0x-prefixed transaction hash.
    pub tx_hash: String,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Durably records a message. Topping up fees, signing and waiting for
/// confirmation are the implementation's concern.
pub trait LedgerPort {
    fn record(&mut self, message: &str) -> Result<LedgerReceipt, LedgerError>;
}

/// An absent recorder behaves as a disabled one.
impl<T: LedgerPort> LedgerPort for Option<T> {
    fn record(&mut self, message: &str) -> Result<LedgerReceipt, LedgerError> {
        match self {
            Some(inner) => inner.record(message),
            None => Err(LedgerError::Disabled),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Load configuration. Returns [`SystemConfig::default()`] if no
    /// stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for alert log and ledger record timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}
