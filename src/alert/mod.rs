//! Alarm evaluation.
//!
//! [`evaluate`] is pure: it compares one [`SensorSample`] with the
//! configured [`Thresholds`] and reports which conditions hold, in the
//! fixed order gas → temperature → tilt. Edge detection against the
//! remembered state lives in [`state`]; the append-only history of
//! transitions lives in [`log`].
//!
//! ```text
//!  SensorSample ──▶ evaluate() ──▶ AlertDecision ──▶ AlertState::transition()
//!                                                         │
//!                                                  Some(Edge) ──▶ dispatch
//! ```

pub mod log;
pub mod state;

use core::fmt;
use core::fmt::Write as _;

use serde::Serialize;

use crate::config::Thresholds;
use crate::sensors::{SensorSample, TiltStatus};

/// Text dispatched on a falling edge.
pub const BACK_TO_NORMAL_MESSAGE: &str = "✅ All sensors back to normal.";

/// A single breached condition, carrying the reading that breached it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AlarmCondition {
    GasLeak { level: f32 },
    HighTemperature { celsius: f32 },
    Tilt,
}

impl fmt::Display for AlarmCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GasLeak { level } => write!(f, "🚨 Gas Leak Detected! Level: {level}"),
            Self::HighTemperature { celsius } => write!(f, "🔥 High Temperature: {celsius}°C"),
            Self::Tilt => write!(f, "⚠️ Tilt Detected! Possible instability."),
        }
    }
}

/// Result of evaluating one sample. At most one entry per condition kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertDecision {
    pub conditions: heapless::Vec<AlarmCondition, 3>,
}

impl AlertDecision {
    /// True when any condition holds.
    pub fn is_alarmed(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// One newline-terminated line per condition, or the empty string.
    pub fn message(&self) -> String {
        let mut out = String::new();
        for c in &self.conditions {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{c}");
        }
        out
    }
}

/// Evaluate a sample against the thresholds. Deterministic for any input,
/// including non-finite readings (a NaN reading never breaches).
pub fn evaluate(sample: &SensorSample, thresholds: &Thresholds) -> AlertDecision {
    let mut conditions = heapless::Vec::new();

    // Capacity is exactly the number of condition kinds, so pushes succeed.
    if sample.gas > thresholds.gas_max {
        let _ = conditions.push(AlarmCondition::GasLeak { level: sample.gas });
    }
    if sample.temperature > thresholds.temp_max {
        let _ = conditions.push(AlarmCondition::HighTemperature {
            celsius: sample.temperature,
        });
    }
    if sample.tilt == TiltStatus::TiltDetected {
        let _ = conditions.push(AlarmCondition::Tilt);
    }

    AlertDecision { conditions }
}
