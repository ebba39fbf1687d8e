//! JSON-RPC ledger recorder.
//!
//! Implements [`LedgerPort`] against an Ethereum-compatible development
//! node. Each record is a zero-value self-transfer from the acting account
//! whose `data` field carries the UTF-8 message.
//!
//! ## Record sequence
//!
//! 1. If the acting account cannot cover `gas_limit × gas_price`, the first
//!    node-managed account sends it `funding_amount_wei` and the recorder
//!    waits (bounded) for that transfer's receipt.
//! 2. Fetch chain id and pending nonce, sign locally, broadcast.
//! 3. Poll for the receipt until `confirmation_timeout_secs` elapses or the
//!    cancel handle is set.
//!
//! Every wait is bounded; the session never blocks indefinitely on the node.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::Serialize;

use super::signer::{LegacyTransaction, LegacyTxSigner};
use crate::app::ports::{LedgerPort, LedgerReceipt};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, RpcError};
use crate::rpc::RpcClient;
use crate::rpc::client::{Receipt, TransferRequest};
use crate::rpc::codec::{decode_address, decode_quantity, wei_to_ether};

/// Node-managed accounts listed in the overview.
const OVERVIEW_ACCOUNTS: usize = 6;

/// Acting account summary for display.
#[derive(Debug, Clone, Serialize)]
pub struct AccountOverview {
    pub address: String,
    pub balance_wei: u128,
    pub balance_ether: f64,
    /// First few node-managed (unlocked) accounts.
    pub node_accounts: Vec<String>,
}

/// One row of the chain-wide transaction listing.
#[derive(Debug, Clone, Serialize)]
pub struct ChainTransaction {
    pub block: u64,
    pub tx_hash: String,
    pub from: String,
    pub to: Option<String>,
    pub value_ether: f64,
    pub input: String,
}

pub struct JsonRpcLedger {
    client: RpcClient,
    signer: LegacyTxSigner,
    account: String,
    to: [u8; 20],
    config: LedgerConfig,
    cancel: Arc<AtomicBool>,
}

impl JsonRpcLedger {
    /// Build a recorder from configuration. Fails if the private key is
    /// invalid or does not belong to the configured account.
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let signer = LegacyTxSigner::from_hex(&config.private_key)?;
        let to = decode_address(&config.account)?;
        if to != signer.address() {
            return Err(LedgerError::Signing(format!(
                "private key belongs to {}, not {}",
                signer.address_hex(),
                config.account
            )));
        }

        let client = RpcClient::new(
            config.rpc_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        );
        Ok(Self {
            client,
            signer,
            account: config.account.clone(),
            to,
            config: config.clone(),
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Shared flag that aborts an in-flight confirmation wait when set.
    /// Cleared automatically at the start of the next record.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// True if the node answers `eth_chainId`.
    pub fn is_connected(&self) -> bool {
        match self.client.chain_id() {
            Ok(id) => {
                debug!("ledger node {} reachable, chain id {}", self.client.url(), id);
                true
            }
            Err(e) => {
                warn!("ledger node {} unreachable: {e}", self.client.url());
                false
            }
        }
    }

    pub fn account_overview(&self) -> Result<AccountOverview, LedgerError> {
        let balance_wei = self.client.balance(&self.account)?;
        let mut node_accounts = self.client.accounts()?;
        node_accounts.truncate(OVERVIEW_ACCOUNTS);
        Ok(AccountOverview {
            address: self.account.clone(),
            balance_wei,
            balance_ether: wei_to_ether(balance_wei),
            node_accounts,
        })
    }

    /// Every transaction in every block from genesis to the head.
    pub fn load_chain_log(&self) -> Result<Vec<ChainTransaction>, LedgerError> {
        let head = self.client.block_number()?;
        let mut rows = Vec::new();
        for number in 0..=head {
            let Some(block) = self.client.block_with_transactions(number)? else {
                continue;
            };
            for tx in block.transactions {
                rows.push(ChainTransaction {
                    block: number,
                    value_ether: wei_to_ether(decode_quantity(&tx.value)?),
                    tx_hash: tx.hash,
                    from: tx.from,
                    to: tx.to,
                    input: tx.input,
                });
            }
        }
        Ok(rows)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Top up the acting account if it cannot pay for one record.
    fn ensure_funds(&self) -> Result<(), LedgerError> {
        let balance = self.client.balance(&self.account)?;
        let needed = self.config.min_fee_wei();
        if balance >= needed {
            return Ok(());
        }

        let accounts = self.client.accounts()?;
        let Some(funder) = accounts.first() else {
            return Err(LedgerError::InsufficientBalance(format!(
                "balance {balance} wei < {needed} wei and no node-managed account to fund from"
            )));
        };

        info!(
            "Funding {} with {} wei from {}",
            self.account, self.config.funding_amount_wei, funder
        );
        let transfer = TransferRequest::new(
            funder,
            &self.account,
            u128::from(self.config.funding_amount_wei),
            self.config.funding_gas_limit,
            self.config.gas_price_wei(),
        );
        let hash = self
            .client
            .send_transaction(&transfer)
            .map_err(|e| LedgerError::Funding(e.to_string()))?;
        let receipt = self.wait_for_receipt(&hash, Duration::from_secs(self.config.funding_timeout_secs))?;
        if !receipt.succeeded() {
            return Err(LedgerError::Funding(format!("transfer {hash} reverted")));
        }
        Ok(())
    }

    /// Poll for a receipt with a hard deadline.
    fn wait_for_receipt(&self, tx_hash: &str, timeout: Duration) -> Result<Receipt, LedgerError> {
        let started = Instant::now();
        let deadline = started + timeout;
        let poll = Duration::from_millis(self.config.poll_interval_ms);

        loop {
            if self.cancel.load(Ordering::Acquire) {
                return Err(LedgerError::Cancelled(tx_hash.to_string()));
            }
            if let Some(receipt) = self.client.receipt(tx_hash)? {
                return Ok(receipt);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(LedgerError::ConfirmationTimeout {
                    tx_hash: tx_hash.to_string(),
                    waited_secs: started.elapsed().as_secs(),
                });
            }
            thread::sleep(poll.min(deadline - now));
        }
    }
}

impl LedgerPort for JsonRpcLedger {
    fn record(&mut self, message: &str) -> Result<LedgerReceipt, LedgerError> {
        self.cancel.store(false, Ordering::Release);
        self.ensure_funds()?;

        let tx = LegacyTransaction {
            nonce: self.client.pending_nonce(&self.account)?,
            gas_price: self.config.gas_price_wei(),
            gas_limit: self.config.gas_limit,
            to: self.to,
            value: 0,
            data: message.as_bytes().to_vec(),
            chain_id: self.client.chain_id()?,
        };
        let raw = self.signer.sign(&tx)?;

        let tx_hash = self
            .client
            .send_raw_transaction(&raw)
            .map_err(|e| match e {
                RpcError::Protocol { message, .. } => LedgerError::Broadcast(message),
                other => LedgerError::Broadcast(other.to_string()),
            })?;
        debug!("broadcast {tx_hash} (nonce {})", tx.nonce);

        let receipt = self.wait_for_receipt(
            &tx_hash,
            Duration::from_secs(self.config.confirmation_timeout_secs),
        )?;
        if !receipt.succeeded() {
            return Err(LedgerError::Broadcast(format!("transaction {tx_hash} reverted")));
        }

        let block_number = receipt.block()?;
        info!("Recorded alert in block {block_number}: {tx_hash}");
        Ok(LedgerReceipt {
            block_number,
            tx_hash,
        })
    }
}
