//! System configuration parameters
//!
//! All tunable parameters for the SmartSensor monitor.
//! Values are loaded through [`ConfigPort`](crate::app::ports::ConfigPort)
//! and may be overridden from the environment by the binary.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One ether expressed in wei.
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// One gwei expressed in wei.
pub const WEI_PER_GWEI: u64 = 1_000_000_000;

/// Minimum gas for a plain value transfer.
pub const TRANSFER_GAS: u64 = 21_000;

/// Alarm thresholds. A reading strictly above its limit raises an alarm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Gas level limit (sensor units, UI range 0-500)
    pub gas_max: f32,
    /// Temperature limit (Celsius, UI range 20-50)
    pub temp_max: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            gas_max: 200.0,
            temp_max: 40.0,
        }
    }
}

impl Thresholds {
    /// Non-finite limits would silently disable their alarm (`x > NaN` is
    /// always false), so they are rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gas_max.is_finite() {
            return Err(ConfigError::ValidationFailed("thresholds.gas_max must be finite"));
        }
        if !self.temp_max.is_finite() {
            return Err(ConfigError::ValidationFailed("thresholds.temp_max must be finite"));
        }
        Ok(())
    }
}

/// Ledger recorder settings (JSON-RPC development node).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub enabled: bool,
    /// JSON-RPC endpoint of the node
    pub rpc_url: String,
    /// Acting account (0x-prefixed address)
    pub account: String,
    /// Acting account private key, hex, `0x` prefix optional.
    /// Development networks only.
    pub private_key: String,

    // --- Fees ---
    pub gas_price_gwei: u64,
    /// Gas limit for the alert record transaction
    pub gas_limit: u64,
    /// Gas limit for the top-up transfer
    pub funding_gas_limit: u64,
    /// Amount sent by the node-managed account when topping up
    pub funding_amount_wei: u64,

    // --- Timing ---
    pub funding_timeout_secs: u64,
    pub confirmation_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rpc_url: "http://127.0.0.1:7545".into(),
            account: String::new(),
            private_key: String::new(),

            gas_price_gwei: 1,
            gas_limit: 100_000,
            funding_gas_limit: TRANSFER_GAS,
            funding_amount_wei: WEI_PER_ETHER,

            funding_timeout_secs: 30,
            confirmation_timeout_secs: 60,
            poll_interval_ms: 500,
            request_timeout_secs: 10,
        }
    }
}

impl LedgerConfig {
    /// Gas price in wei.
    pub fn gas_price_wei(&self) -> u64 {
        self.gas_price_gwei.saturating_mul(WEI_PER_GWEI)
    }

    /// Worst-case fee for one alert record transaction.
    pub fn min_fee_wei(&self) -> u128 {
        u128::from(self.gas_limit) * u128::from(self.gas_price_wei())
    }
}

/// Chat notification settings (Telegram Bot API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub enabled: bool,
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: i64,
    pub timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: "https://api.telegram.org".into(),
            bot_token: String::new(),
            chat_id: 0,
            timeout_secs: 10,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub thresholds: Thresholds,
    /// Samples kept per rolling history (gas, temperature)
    pub history_len: usize,
    pub ledger: LedgerConfig,
    pub notifier: NotifierConfig,
}

impl SystemConfig {
    pub const DEFAULT_HISTORY_LEN: usize = 100;

    /// Reject invalid values instead of clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.history_len == 0 {
            return Err(ConfigError::ValidationFailed("history_len must be at least 1"));
        }

        let l = &self.ledger;
        if l.enabled {
            if l.rpc_url.is_empty() {
                return Err(ConfigError::ValidationFailed("ledger.rpc_url is empty"));
            }
            if l.account.is_empty() || l.private_key.is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "ledger.account and ledger.private_key are required when the ledger is enabled",
                ));
            }
        }
        if l.gas_limit < TRANSFER_GAS || l.funding_gas_limit < TRANSFER_GAS {
            return Err(ConfigError::ValidationFailed("ledger gas limits must be at least 21000"));
        }
        if l.gas_price_gwei == 0 {
            return Err(ConfigError::ValidationFailed("ledger.gas_price_gwei must be non-zero"));
        }
        if l.funding_timeout_secs == 0
            || l.confirmation_timeout_secs == 0
            || l.request_timeout_secs == 0
            || l.poll_interval_ms == 0
        {
            return Err(ConfigError::ValidationFailed("ledger timeouts must be non-zero"));
        }

        let n = &self.notifier;
        if n.enabled && (n.bot_token.is_empty() || n.api_base.is_empty()) {
            return Err(ConfigError::ValidationFailed(
                "notifier.bot_token is required when the notifier is enabled",
            ));
        }
        if n.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed("notifier.timeout_secs must be non-zero"));
        }
        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            history_len: Self::DEFAULT_HISTORY_LEN,
            ledger: LedgerConfig::default(),
            notifier: NotifierConfig::default(),
        }
    }
}
