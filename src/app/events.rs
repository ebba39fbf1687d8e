//! Outbound application events.
//!
//! The [`MonitorSession`](super::service::MonitorSession) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them.

use crate::config::Thresholds;
use crate::error::{InputError, LedgerError, NotifyError};
use crate::sensors::SensorSample;

use super::ports::LedgerRecord;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The session has started.
    Started {
        thresholds: Thresholds,
        history_len: usize,
    },

    /// One observation cycle completed.
    Observed {
        cycle: u64,
        sample: SensorSample,
        alarmed: bool,
    },

    /// Rising edge processed.
    AlertRaised { message: String },

    /// Falling edge processed.
    AlertCleared { message: String },

    /// A sample fell outside the documented input ranges.
    InputOutOfRange(InputError),

    NotifyFailed(NotifyError),

    LedgerRecorded(LedgerRecord),

    LedgerFailed(LedgerError),

    /// Thresholds replaced at runtime.
    ThresholdsUpdated(Thresholds),
}
