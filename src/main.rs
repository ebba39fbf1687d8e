//! SmartSensor stdin driver
//!
//! Runs one observation cycle per input line and prints the status banner
//! and any notices, the way the dashboard would render them.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │  JsonConfigStore   TelegramNotifier   JsonRpcLedger          │
//! │  (ConfigPort)      (NotificationPort) (LedgerPort)           │
//! │  LogEventSink      SystemClock                               │
//! │  (EventSink)       (Clock)                                   │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │         MonitorSession (pure logic)                    │  │
//! │  │  intake · evaluate · edge-triggered dispatch           │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input lines: `<gas> <temperature> <stable|tilt>` or
//! `thresholds <gas_max> <temp_max>`. Blank lines and `#` comments are
//! skipped.

#![deny(unused_must_use)]

use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use log::{info, warn};

use smartsensor::adapters::config_file::JsonConfigStore;
use smartsensor::adapters::ledger::JsonRpcLedger;
use smartsensor::adapters::log_sink::LogEventSink;
use smartsensor::adapters::telegram::TelegramNotifier;
use smartsensor::adapters::time::SystemClock;
use smartsensor::app::commands::AppCommand;
use smartsensor::app::ports::ConfigPort;
use smartsensor::app::service::{CycleReport, MonitorSession};
use smartsensor::config::SystemConfig;

const DEFAULT_CONFIG_PATH: &str = "smartsensor.json";

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("SmartSensor v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let path = std::env::var("SMARTSENSOR_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let store = JsonConfigStore::new(&path);
    let mut config = store
        .load()
        .with_context(|| format!("loading config from {path}"))?;
    apply_env_overrides(&mut config)?;
    config.validate().context("invalid configuration")?;

    // ── 3. Collaborators ──────────────────────────────────────
    let mut notifier = config
        .notifier
        .enabled
        .then(|| TelegramNotifier::new(&config.notifier));
    if notifier.is_none() {
        info!("Notification channel disabled");
    }

    let mut ledger = if config.ledger.enabled {
        let ledger = JsonRpcLedger::new(&config.ledger).context("building ledger recorder")?;
        if !ledger.is_connected() {
            bail!(
                "cannot connect to ledger node at {}; is it running?",
                config.ledger.rpc_url
            );
        }
        match ledger.account_overview() {
            Ok(o) => {
                info!("Acting account {} balance {} ETH", o.address, o.balance_ether);
                for (i, a) in o.node_accounts.iter().enumerate() {
                    info!("  node account {i}: {a}");
                }
            }
            Err(e) => warn!("Account overview unavailable: {e}"),
        }
        Some(ledger)
    } else {
        info!("Ledger recorder disabled");
        None
    };

    // ── 4. Session loop ───────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut session = MonitorSession::new(&config, SystemClock);
    session.start(&mut sink);

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cmd: AppCommand = match line.parse() {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };
        if let Some(report) = session.handle_command(cmd, &mut notifier, &mut ledger, &mut sink) {
            print_report(&report);
        }
    }

    // ── 5. Session summary ────────────────────────────────────
    println!("--- Alerts History ---");
    if session.alert_log().is_empty() {
        println!("No alerts yet.");
    }
    for e in session.alert_log().entries() {
        println!(
            "{} {:?} {}",
            e.timestamp.format("%H:%M:%S"),
            e.kind,
            e.message.trim_end().replace('\n', " | ")
        );
    }
    println!("--- Blockchain Transactions ---");
    if session.ledger_records().is_empty() {
        println!("No dashboard-sent transactions yet.");
    }
    for r in session.ledger_records() {
        println!("block {} {} {}", r.block_number, r.tx_hash, r.message.trim_end().replace('\n', " | "));
    }
    if let Some(ledger) = &ledger {
        print_chain_log(ledger);
    }
    Ok(())
}

fn print_report(report: &CycleReport) {
    if report.alarmed() {
        println!("#{} ⚠ Alert Active!", report.cycle);
    } else {
        println!("#{} ✅ All sensors normal.", report.cycle);
    }
    for notice in &report.notices {
        println!("    {notice}");
    }
}

fn print_chain_log(ledger: &JsonRpcLedger) {
    match ledger.load_chain_log() {
        Ok(rows) => {
            println!("--- Chain Log ({} transactions) ---", rows.len());
            for tx in rows {
                println!(
                    "block {} {} {} -> {} {} ETH {}",
                    tx.block,
                    tx.tx_hash,
                    tx.from,
                    tx.to.as_deref().unwrap_or("(create)"),
                    tx.value_ether,
                    tx.input
                );
            }
        }
        Err(e) => warn!("Could not load chain log: {e}"),
    }
}

/// Secrets are usually supplied through the environment rather than the file.
fn apply_env_overrides(config: &mut SystemConfig) -> Result<()> {
    if let Ok(token) = std::env::var("SMARTSENSOR_BOT_TOKEN") {
        config.notifier.bot_token = token;
    }
    if let Ok(chat) = std::env::var("SMARTSENSOR_CHAT_ID") {
        config.notifier.chat_id = chat
            .parse()
            .with_context(|| format!("SMARTSENSOR_CHAT_ID is not an integer: {chat:?}"))?;
    }
    if let Ok(key) = std::env::var("SMARTSENSOR_PRIVATE_KEY") {
        config.ledger.private_key = key;
    }
    Ok(())
}
