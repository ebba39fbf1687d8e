//! Adapters implementing the port traits.
//!
//! | Adapter       | Implements        | Connects to                  |
//! |---------------|-------------------|------------------------------|
//! | `config_file` | ConfigPort        | JSON file on disk            |
//! | `ledger`      | LedgerPort        | Ethereum JSON-RPC dev node   |
//! | `log_sink`    | EventSink         | `log` facade                 |
//! | `signer`      | (used by ledger)  | secp256k1 / Keccak / RLP     |
//! | `telegram`    | NotificationPort  | Telegram Bot API             |
//! | `time`        | Clock             | host local time              |

pub mod config_file;
pub mod ledger;
pub mod log_sink;
pub mod signer;
pub mod telegram;
pub mod time;
