//! Ethereum JSON-RPC plumbing for the ledger recorder.
//!
//! ```text
//!  JsonRpcLedger ──▶ RpcClient ──HTTP POST──▶ development node
//!                       │
//!                     codec (QUANTITY / DATA hex)
//! ```

pub mod client;
pub mod codec;

pub use client::RpcClient;
