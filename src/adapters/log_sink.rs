//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade. The binary routes those to stderr via `env_logger`.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                thresholds,
                history_len,
            } => {
                info!(
                    "START | gas_max={} temp_max={}\u{00b0}C | history={}",
                    thresholds.gas_max, thresholds.temp_max, history_len
                );
            }
            AppEvent::Observed {
                cycle,
                sample,
                alarmed,
            } => {
                debug!(
                    "OBSERVE | #{} | gas={} T={}\u{00b0}C tilt={:?} | {}",
                    cycle,
                    sample.gas,
                    sample.temperature,
                    sample.tilt,
                    if *alarmed { "ALARM" } else { "OK" },
                );
            }
            AppEvent::AlertRaised { message } => {
                warn!("ALERT | {}", message.trim_end().replace('\n', " | "));
            }
            AppEvent::AlertCleared { message } => {
                info!("NORMAL | {}", message);
            }
            AppEvent::InputOutOfRange(e) => {
                warn!("OBSERVE | input out of range: {}", e);
            }
            AppEvent::NotifyFailed(e) => {
                warn!("NOTIFY | failed: {}", e);
            }
            AppEvent::LedgerRecorded(r) => {
                info!("LEDGER | block={} tx={}", r.block_number, r.tx_hash);
            }
            AppEvent::LedgerFailed(e) => {
                warn!("LEDGER | failed: {}", e);
            }
            AppEvent::ThresholdsUpdated(t) => {
                info!("CONFIG | gas_max={} temp_max={}\u{00b0}C", t.gas_max, t.temp_max);
            }
        }
    }
}
