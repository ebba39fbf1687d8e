//! Recording mock adapters for integration tests.
//!
//! Every port call is captured so tests can assert on the exact dispatch
//! history without a chat endpoint or a ledger node.

use chrono::{DateTime, Local, TimeZone};
use smartsensor::app::events::AppEvent;
use smartsensor::app::ports::{Clock, EventSink, LedgerPort, LedgerReceipt, NotificationPort};
use smartsensor::error::{LedgerError, NotifyError};

// ── Notifier ──────────────────────────────────────────────────

pub struct MockNotifier {
    pub calls: Vec<String>,
    pub fail_with: Option<NotifyError>,
}

#[allow(dead_code)]
impl MockNotifier {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_with: None,
        }
    }

    pub fn failing(err: NotifyError) -> Self {
        Self {
            calls: Vec::new(),
            fail_with: Some(err),
        }
    }
}

impl NotificationPort for MockNotifier {
    fn notify(&mut self, message: &str) -> Result<(), NotifyError> {
        self.calls.push(message.to_string());
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

// ── Ledger ────────────────────────────────────────────────────

pub struct MockLedger {
    pub calls: Vec<String>,
    pub fail_with: Option<LedgerError>,
    next_block: u64,
}

#[allow(dead_code)]
impl MockLedger {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_with: None,
            next_block: 1,
        }
    }

    pub fn failing(err: LedgerError) -> Self {
        Self {
            calls: Vec::new(),
            fail_with: Some(err),
            next_block: 1,
        }
    }
}

impl LedgerPort for MockLedger {
    fn record(&mut self, message: &str) -> Result<LedgerReceipt, LedgerError> {
        self.calls.push(message.to_string());
        if let Some(e) = &self.fail_with {
            return Err(e.clone());
        }
        let block_number = self.next_block;
        self.next_block += 1;
        Ok(LedgerReceipt {
            block_number,
            tx_hash: format!("0x{block_number:064x}"),
        })
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct VecSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|&e| pred(e)).count()
    }
}

impl EventSink for VecSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Clock ─────────────────────────────────────────────────────

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        fixed_time()
    }
}

pub fn fixed_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
}
