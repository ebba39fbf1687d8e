//! Wall-clock adapter.

use chrono::{DateTime, Local};

use crate::app::ports::Clock;

/// [`Clock`] backed by the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
