//! Inbound commands to the monitoring session.
//!
//! These represent actions requested by the outside world (UI layer,
//! stdin driver) that the [`MonitorSession`](super::service::MonitorSession)
//! interprets and acts upon.

use crate::config::Thresholds;
use crate::sensors::{SensorSample, TiltStatus};

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Run one observation cycle for a fresh set of readings.
    Observe(SensorSample),

    /// Replace the thresholds used by subsequent evaluations.
    /// The remembered alarm polarity is kept.
    UpdateThresholds(Thresholds),
}

/// Why a command line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(pub String);

impl core::fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "cannot parse command: {}", self.0)
    }
}

impl std::error::Error for ParseCommandError {}

impl core::str::FromStr for AppCommand {
    type Err = ParseCommandError;

    /// Accepts `<gas> <temperature> <stable|tilt>` or
    /// `thresholds <gas_max> <temp_max>`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        fn num(s: &str) -> Result<f32, ParseCommandError> {
            s.parse::<f32>()
                .map_err(|_| ParseCommandError(format!("not a number: {s:?}")))
        }

        let fields: Vec<&str> = line.split_whitespace().collect();

        match fields.as_slice() {
            ["thresholds", gas_max, temp_max] => {
                let thresholds = Thresholds {
                    gas_max: num(gas_max)?,
                    temp_max: num(temp_max)?,
                };
                thresholds
                    .validate()
                    .map_err(|e| ParseCommandError(e.to_string()))?;
                Ok(Self::UpdateThresholds(thresholds))
            }
            [gas, temperature, tilt @ ..] if !tilt.is_empty() => {
                let tilt: TiltStatus = tilt
                    .join(" ")
                    .parse()
                    .map_err(|()| ParseCommandError(format!("unknown tilt status: {:?}", tilt.join(" "))))?;
                Ok(Self::Observe(SensorSample::new(num(gas)?, num(temperature)?, tilt)))
            }
            _ => Err(ParseCommandError(line.to_string())),
        }
    }
}
