//! Sensor reading intake.
//!
//! The UI layer hands over one [`SensorSample`] per refresh cycle.
//! [`SensorIntake`] appends the numeric readings to bounded rolling
//! histories that the UI charts; the tilt status is not charted.

pub mod history;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use history::RollingHistory;

/// Documented UI slider range for the gas reading.
pub const GAS_RANGE: (f32, f32) = (0.0, 500.0);

/// Documented UI slider range for the temperature reading (Celsius).
pub const TEMPERATURE_RANGE: (f32, f32) = (20.0, 50.0);

/// Tilt switch status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TiltStatus {
    #[default]
    Stable,
    TiltDetected,
}

impl core::str::FromStr for TiltStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stable" | "0" => Ok(Self::Stable),
            "tilt" | "tilt detected" | "tilted" | "1" => Ok(Self::TiltDetected),
            _ => Err(()),
        }
    }
}

/// One set of readings, produced once per UI refresh.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorSample {
    pub gas: f32,
    /// Degrees Celsius.
    pub temperature: f32,
    pub tilt: TiltStatus,
}

impl SensorSample {
    pub fn new(gas: f32, temperature: f32, tilt: TiltStatus) -> Self {
        Self {
            gas,
            temperature,
            tilt,
        }
    }

    /// Every numeric reading outside the documented UI ranges, gas first.
    ///
    /// Advisory only: an out-of-range sample is still observed and
    /// evaluated.
    pub fn range_errors(&self) -> heapless::Vec<InputError, 2> {
        [
            check_field("gas", self.gas, GAS_RANGE),
            check_field("temperature", self.temperature, TEMPERATURE_RANGE),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }
}

fn check_field(field: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), InputError> {
    // `contains` is false for NaN.
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Owns the gas and temperature histories for one monitoring session.
#[derive(Debug, Clone)]
pub struct SensorIntake {
    gas: RollingHistory<f32>,
    temperature: RollingHistory<f32>,
}

impl SensorIntake {
    pub fn new(history_len: usize) -> Self {
        Self {
            gas: RollingHistory::new(history_len),
            temperature: RollingHistory::new(history_len),
        }
    }

    /// Append the sample's gas and temperature readings.
    pub fn observe(&mut self, sample: &SensorSample) {
        self.gas.push(sample.gas);
        self.temperature.push(sample.temperature);
    }

    pub fn gas_history(&self) -> &RollingHistory<f32> {
        &self.gas
    }

    pub fn temperature_history(&self) -> &RollingHistory<f32> {
        &self.temperature
    }
}
