//! Typed error enums for every SmartSensor subsystem.
//!
//! The monitoring core never lets a collaborator error escape a cycle:
//! [`NotifyError`] and [`LedgerError`] are caught by the session and turned
//! into notices. [`InputError`] is advisory only. The remaining types cover
//! configuration and the JSON-RPC transport used by the ledger adapter.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Notification channel
// ---------------------------------------------------------------------------

/// Failure delivering a message through the notification channel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// The channel is switched off in configuration.
    #[error("notification channel disabled")]
    Disabled,
    /// The request never reached the endpoint (DNS, TCP, TLS, timeout).
    #[error("notification transport failed: {0}")]
    Transport(String),
    /// The endpoint answered but refused the message.
    #[error("notification rejected ({status}): {reason}")]
    Rejected { status: u16, reason: String },
}

// ---------------------------------------------------------------------------
// Ledger recorder
// ---------------------------------------------------------------------------

/// Failure recording a message on the ledger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Ledger recording is switched off in configuration.
    #[error("ledger recorder disabled")]
    Disabled,
    /// The acting account cannot pay fees and nobody can top it up.
    #[error("insufficient balance: {0}")]
    InsufficientBalance(String),
    /// The top-up transfer from a node-managed account failed.
    #[error("funding transfer failed: {0}")]
    Funding(String),
    /// The transaction could not be signed (bad key, bad encoding).
    #[error("signing failed: {0}")]
    Signing(String),
    /// The node refused the signed transaction.
    #[error("broadcast failed: {0}")]
    Broadcast(String),
    /// No receipt appeared within the bounded wait.
    #[error("no receipt for {tx_hash} after {waited_secs}s")]
    ConfirmationTimeout { tx_hash: String, waited_secs: u64 },
    /// The wait was aborted through the cancel handle.
    #[error("confirmation wait cancelled for {0}")]
    Cancelled(String),
    /// Any other node error.
    #[error("rpc: {0}")]
    Rpc(#[from] RpcError),
}

// ---------------------------------------------------------------------------
// Sensor input
// ---------------------------------------------------------------------------

/// A sample outside the range the UI layer is documented to produce.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("{field} = {value} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Errors from loading, validating or persisting [`SystemConfig`](crate::config::SystemConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No stored configuration exists.
    #[error("config not found")]
    NotFound,
    /// Stored configuration failed to deserialize.
    #[error("config corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
    /// A field failed range validation. Describes which field and why.
    #[error("validation failed: {0}")]
    ValidationFailed(&'static str),
    /// Generic I/O error from the backing store.
    #[error("config I/O: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// JSON-RPC transport
// ---------------------------------------------------------------------------

/// Errors from a single JSON-RPC call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    /// Connection-level failure.
    #[error("transport: {0}")]
    Transport(String),
    /// Non-2xx HTTP status.
    #[error("HTTP {0}")]
    Status(u16),
    /// The node returned a JSON-RPC error object.
    #[error("node error {code}: {message}")]
    Protocol { code: i64, message: String },
    /// The response could not be decoded into the expected shape.
    #[error("decode: {0}")]
    Decode(String),
}
