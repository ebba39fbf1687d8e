//! Monitoring session.
//!
//! [`MonitorSession`] owns everything scoped to one monitoring session:
//! the rolling histories, the remembered alarm polarity, the alert log and
//! the ledger references obtained so far. Each call to
//! [`observe`](MonitorSession::observe) runs one complete cycle:
//!
//! ```text
//!  SensorSample ──▶ intake ──▶ evaluate ──▶ transition? ──▶ NotificationPort
//!                                                      └──▶ LedgerPort
//!                                                      └──▶ AlertLog
//! ```
//!
//! Collaborator failures are isolated: a failed notification never skips
//! the ledger call, neither one prevents the log append, and none of them
//! rolls back the polarity flip.

use core::fmt;

use log::{debug, info, warn};

use crate::alert::log::{AlertKind, AlertLog, AlertLogEntry};
use crate::alert::state::{AlertState, Edge};
use crate::alert::{AlertDecision, BACK_TO_NORMAL_MESSAGE, evaluate};
use crate::config::{SystemConfig, Thresholds};
use crate::error::{InputError, LedgerError, NotifyError};
use crate::sensors::{SensorIntake, SensorSample};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Clock, EventSink, LedgerPort, LedgerRecord, NotificationPort};

// ───────────────────────────────────────────────────────────────
// Cycle output
// ───────────────────────────────────────────────────────────────

/// A visible, non-blocking notice produced during a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    InputOutOfRange(InputError),
    NotifyFailed(NotifyError),
    LedgerRecorded { tx_hash: String, block_number: u64 },
    LedgerFailed(LedgerError),
}

impl Notice {
    /// True for notices that report a failure.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::LedgerRecorded { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputOutOfRange(e) => write!(f, "Input out of range (evaluated anyway): {e}"),
            Self::NotifyFailed(e) => write!(f, "Notification send error (non-fatal): {e}"),
            Self::LedgerRecorded { tx_hash, .. } => write!(f, "Logged to blockchain: {tx_hash}"),
            Self::LedgerFailed(e) => write!(f, "Blockchain TX failed: {e}"),
        }
    }
}

/// Everything one observation cycle produced.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based cycle number within the session.
    pub cycle: u64,
    pub decision: AlertDecision,
    /// Edge processed this cycle, if the polarity flipped.
    pub edge: Option<Edge>,
    /// Log entry appended this cycle (exactly when `edge` is `Some`).
    pub log_entry: Option<AlertLogEntry>,
    pub notices: Vec<Notice>,
}

impl CycleReport {
    /// Status banner state for this cycle.
    pub fn alarmed(&self) -> bool {
        self.decision.is_alarmed()
    }
}

/// Result of [`MonitorSession::dispatch`].
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    pub edge: Option<Edge>,
    pub log_entry: Option<AlertLogEntry>,
    pub notices: Vec<Notice>,
}

// ───────────────────────────────────────────────────────────────
// MonitorSession
// ───────────────────────────────────────────────────────────────

pub struct MonitorSession<C> {
    thresholds: Thresholds,
    intake: SensorIntake,
    state: AlertState,
    log: AlertLog,
    ledger_records: Vec<LedgerRecord>,
    clock: C,
    cycle_count: u64,
}

impl<C: Clock> MonitorSession<C> {
    /// Construct a session in the normal state with empty histories.
    pub fn new(config: &SystemConfig, clock: C) -> Self {
        Self {
            thresholds: config.thresholds,
            intake: SensorIntake::new(config.history_len),
            state: AlertState::new(),
            log: AlertLog::new(),
            ledger_records: Vec::new(),
            clock,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            thresholds: self.thresholds,
            history_len: self.intake.gas_history().capacity(),
        });
        info!(
            "MonitorSession started (gas_max={}, temp_max={})",
            self.thresholds.gas_max, self.thresholds.temp_max
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: intake → evaluate → dispatch.
    pub fn observe(
        &mut self,
        sample: SensorSample,
        notifier: &mut impl NotificationPort,
        ledger: &mut impl LedgerPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;
        let mut notices = Vec::new();

        // 1. Advisory range check
        for e in sample.range_errors() {
            warn!("cycle {}: {e}", self.cycle_count);
            sink.emit(&AppEvent::InputOutOfRange(e.clone()));
            notices.push(Notice::InputOutOfRange(e));
        }

        // 2. Intake
        self.intake.observe(&sample);

        // 3. Pure evaluation
        let decision = self.evaluate(&sample);
        sink.emit(&AppEvent::Observed {
            cycle: self.cycle_count,
            sample,
            alarmed: decision.is_alarmed(),
        });

        // 4. Edge-triggered dispatch
        let outcome = self.dispatch(&decision, notifier, ledger, sink);
        notices.extend(outcome.notices);

        CycleReport {
            cycle: self.cycle_count,
            decision,
            edge: outcome.edge,
            log_entry: outcome.log_entry,
            notices,
        }
    }

    /// Evaluate a sample against the current thresholds. Pure.
    pub fn evaluate(&self, sample: &SensorSample) -> AlertDecision {
        evaluate(sample, &self.thresholds)
    }

    /// Act on a decision: on a polarity flip, commit the new state, notify,
    /// record on the ledger and append a log entry. Otherwise do nothing.
    pub fn dispatch(
        &mut self,
        decision: &AlertDecision,
        notifier: &mut impl NotificationPort,
        ledger: &mut impl LedgerPort,
        sink: &mut impl EventSink,
    ) -> DispatchOutcome {
        let Some(edge) = self.state.transition(decision.is_alarmed()) else {
            return DispatchOutcome::default();
        };

        let message = match edge {
            Edge::Rising => decision.message(),
            Edge::Falling => BACK_TO_NORMAL_MESSAGE.to_string(),
        };
        info!("{:?} edge: {}", edge, message.trim_end());

        let mut notices = Vec::new();

        // Both collaborators are always attempted.
        if let Some(n) = self.send_notification(notifier, &message, sink) {
            notices.push(n);
        }
        if let Some(n) = self.send_ledger_record(ledger, &message, sink) {
            notices.push(n);
        }

        let entry = self
            .log
            .append(AlertLogEntry {
                timestamp: self.clock.now(),
                kind: AlertKind::from(edge),
                message: message.clone(),
            })
            .clone();

        sink.emit(&match edge {
            Edge::Rising => AppEvent::AlertRaised { message },
            Edge::Falling => AppEvent::AlertCleared { message },
        });

        DispatchOutcome {
            edge: Some(edge),
            log_entry: Some(entry),
            notices,
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command. Returns the cycle report for
    /// [`AppCommand::Observe`].
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        notifier: &mut impl NotificationPort,
        ledger: &mut impl LedgerPort,
        sink: &mut impl EventSink,
    ) -> Option<CycleReport> {
        match cmd {
            AppCommand::Observe(sample) => Some(self.observe(sample, notifier, ledger, sink)),
            AppCommand::UpdateThresholds(thresholds) => {
                if let Err(e) = thresholds.validate() {
                    warn!("Threshold update ignored: {e}");
                    return None;
                }
                self.thresholds = thresholds;
                sink.emit(&AppEvent::ThresholdsUpdated(thresholds));
                info!(
                    "Thresholds updated (gas_max={}, temp_max={})",
                    thresholds.gas_max, thresholds.temp_max
                );
                None
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_alarmed(&self) -> bool {
        self.state.is_alarmed()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn intake(&self) -> &SensorIntake {
        &self.intake
    }

    pub fn alert_log(&self) -> &AlertLog {
        &self.log
    }

    /// Ledger references obtained this session, oldest first.
    pub fn ledger_records(&self) -> &[LedgerRecord] {
        &self.ledger_records
    }

    /// Observation cycles run since the session started.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn send_notification(
        &self,
        notifier: &mut impl NotificationPort,
        message: &str,
        sink: &mut impl EventSink,
    ) -> Option<Notice> {
        match notifier.notify(message) {
            Ok(()) => None,
            Err(NotifyError::Disabled) => {
                debug!("notification skipped: channel disabled");
                None
            }
            Err(e) => {
                warn!("Notification failed (non-fatal): {e}");
                sink.emit(&AppEvent::NotifyFailed(e.clone()));
                Some(Notice::NotifyFailed(e))
            }
        }
    }

    fn send_ledger_record(
        &mut self,
        ledger: &mut impl LedgerPort,
        message: &str,
        sink: &mut impl EventSink,
    ) -> Option<Notice> {
        match ledger.record(message) {
            Ok(receipt) => {
                let record = LedgerRecord {
                    block_number: receipt.block_number,
                    tx_hash: receipt.tx_hash,
                    message: message.to_string(),
                    timestamp: self.clock.now(),
                };
                sink.emit(&AppEvent::LedgerRecorded(record.clone()));
                let notice = Notice::LedgerRecorded {
                    tx_hash: record.tx_hash.clone(),
                    block_number: record.block_number,
                };
                self.ledger_records.push(record);
                Some(notice)
            }
            Err(LedgerError::Disabled) => {
                debug!("ledger record skipped: recorder disabled");
                None
            }
            Err(e) => {
                warn!("Ledger record failed (non-fatal): {e}");
                sink.emit(&AppEvent::LedgerFailed(e.clone()));
                Some(Notice::LedgerFailed(e))
            }
        }
    }
}
