//! Blocking JSON-RPC 2.0 client over HTTP.
//!
//! Every call is a single POST with the agent-wide timeout, so no call
//! can hang the session. Typed helpers cover the handful of `eth_*`
//! methods the ledger adapter needs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::codec::{decode_quantity, decode_u64, encode_data, encode_quantity};
use crate::error::RpcError;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct Request<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    code: i64,
    message: String,
}

/// Transaction receipt fields used by the ledger adapter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: String,
    pub block_number: String,
    /// `0x1` success, `0x0` reverted. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<String>,
}

impl Receipt {
    pub fn block(&self) -> Result<u64, RpcError> {
        decode_u64(&self.block_number)
    }

    pub fn succeeded(&self) -> bool {
        self.status.as_deref().is_none_or(|s| decode_quantity(s).is_ok_and(|v| v == 1))
    }
}

/// A transaction as returned inside a full block.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockTransaction {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    pub value: String,
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub number: String,
    #[serde(default)]
    pub transactions: Vec<BlockTransaction>,
}

/// Parameters for `eth_sendTransaction` from a node-managed account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas: String,
    pub gas_price: String,
}

impl TransferRequest {
    pub fn new(from: &str, to: &str, value_wei: u128, gas: u64, gas_price_wei: u64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            value: encode_quantity(value_wei),
            gas: encode_quantity(u128::from(gas)),
            gas_price: encode_quantity(u128::from(gas_price_wei)),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct RpcClient {
    agent: ureq::Agent,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("smartsensor/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one call and decode its `result`.
    pub fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let request = Request {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!("rpc -> {} #{}", method, request.id);

        let response: Response = match self.agent.post(&self.url).send_json(&request) {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| RpcError::Decode(format!("{method}: {e}")))?,
            Err(ureq::Error::Status(code, _)) => return Err(RpcError::Status(code)),
            Err(ureq::Error::Transport(t)) => return Err(RpcError::Transport(t.to_string())),
        };

        if let Some(err) = response.error {
            return Err(RpcError::Protocol {
                code: err.code,
                message: err.message,
            });
        }
        serde_json::from_value(response.result.unwrap_or(Value::Null))
            .map_err(|e| RpcError::Decode(format!("{method}: {e}")))
    }

    // ── Typed helpers ─────────────────────────────────────────

    pub fn chain_id(&self) -> Result<u64, RpcError> {
        let s: String = self.call("eth_chainId", json!([]))?;
        decode_u64(&s)
    }

    pub fn block_number(&self) -> Result<u64, RpcError> {
        let s: String = self.call("eth_blockNumber", json!([]))?;
        decode_u64(&s)
    }

    /// Node-managed (unlocked) accounts.
    pub fn accounts(&self) -> Result<Vec<String>, RpcError> {
        self.call("eth_accounts", json!([]))
    }

    pub fn balance(&self, address: &str) -> Result<u128, RpcError> {
        let s: String = self.call("eth_getBalance", json!([address, "latest"]))?;
        decode_quantity(&s)
    }

    /// Next nonce, counting transactions still in the pool.
    pub fn pending_nonce(&self, address: &str) -> Result<u64, RpcError> {
        let s: String = self.call("eth_getTransactionCount", json!([address, "pending"]))?;
        decode_u64(&s)
    }

    /// Transfer from a node-managed account. Returns the transaction hash.
    pub fn send_transaction(&self, tx: &TransferRequest) -> Result<String, RpcError> {
        self.call("eth_sendTransaction", json!([tx]))
    }

    /// Broadcast a signed transaction. Returns the transaction hash.
    pub fn send_raw_transaction(&self, raw: &[u8]) -> Result<String, RpcError> {
        self.call("eth_sendRawTransaction", json!([encode_data(raw)]))
    }

    /// `None` while the transaction is still pending.
    pub fn receipt(&self, tx_hash: &str) -> Result<Option<Receipt>, RpcError> {
        self.call("eth_getTransactionReceipt", json!([tx_hash]))
    }

    /// Block with full transaction objects.
    pub fn block_with_transactions(&self, number: u64) -> Result<Option<Block>, RpcError> {
        self.call(
            "eth_getBlockByNumber",
            json!([encode_quantity(u128::from(number)), true]),
        )
    }
}
