//! Property tests for the alert core invariants.

use chrono::{DateTime, Local};
use proptest::prelude::*;
use smartsensor::alert::evaluate;
use smartsensor::alert::log::AlertKind;
use smartsensor::app::events::AppEvent;
use smartsensor::app::ports::{Clock, EventSink, LedgerPort, LedgerReceipt, NotificationPort};
use smartsensor::app::service::MonitorSession;
use smartsensor::config::{SystemConfig, Thresholds};
use smartsensor::error::{LedgerError, NotifyError};
use smartsensor::sensors::history::RollingHistory;
use smartsensor::sensors::{SensorSample, TiltStatus};

struct Counting(usize);
impl NotificationPort for Counting {
    fn notify(&mut self, _m: &str) -> Result<(), NotifyError> {
        self.0 += 1;
        Err(NotifyError::Transport("offline".into()))
    }
}
impl LedgerPort for Counting {
    fn record(&mut self, _m: &str) -> Result<LedgerReceipt, LedgerError> {
        self.0 += 1;
        Err(LedgerError::Broadcast("offline".into()))
    }
}

struct Now;
impl Clock for Now {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

struct NullSink;
impl EventSink for NullSink {
    fn emit(&mut self, _e: &AppEvent) {}
}

fn arb_sample() -> impl Strategy<Value = SensorSample> {
    (0.0f32..=500.0, 20.0f32..=50.0, any::<bool>()).prop_map(|(gas, temperature, tilted)| {
        let tilt = if tilted {
            TiltStatus::TiltDetected
        } else {
            TiltStatus::Stable
        };
        SensorSample::new(gas, temperature, tilt)
    })
}

proptest! {
    /// Log entries of each kind equal the number of polarity flips of that
    /// direction; collaborators are called exactly once per flip.
    #[test]
    fn log_counts_equal_edge_counts(samples in proptest::collection::vec(arb_sample(), 0..60)) {
        let thresholds = Thresholds::default();
        let mut session = MonitorSession::new(&SystemConfig::default(), Now);
        let (mut n, mut l) = (Counting(0), Counting(0));

        let mut prev = false;
        let (mut rising, mut falling) = (0usize, 0usize);
        for s in &samples {
            let now = evaluate(s, &thresholds).is_alarmed();
            match (prev, now) {
                (false, true) => rising += 1,
                (true, false) => falling += 1,
                _ => {}
            }
            prev = now;
            session.observe(*s, &mut n, &mut l, &mut NullSink);
        }

        prop_assert_eq!(session.alert_log().count(AlertKind::Alert), rising);
        prop_assert_eq!(session.alert_log().count(AlertKind::Normal), falling);
        prop_assert_eq!(n.0, rising + falling);
        prop_assert_eq!(l.0, rising + falling);
        prop_assert_eq!(session.is_alarmed(), prev);
    }

    /// Repeating a sample never dispatches again after the first cycle.
    #[test]
    fn steady_state_is_idempotent(s in arb_sample(), repeats in 1usize..20) {
        let mut session = MonitorSession::new(&SystemConfig::default(), Now);
        let (mut n, mut l) = (Counting(0), Counting(0));
        session.observe(s, &mut n, &mut l, &mut NullSink);
        let (log_len, notified, recorded) = (session.alert_log().len(), n.0, l.0);

        for _ in 0..repeats {
            let report = session.observe(s, &mut n, &mut l, &mut NullSink);
            prop_assert!(report.edge.is_none());
            prop_assert!(report.log_entry.is_none());
        }
        prop_assert_eq!(session.alert_log().len(), log_len);
        prop_assert_eq!(n.0, notified);
        prop_assert_eq!(l.0, recorded);
    }

    /// evaluate() depends only on its inputs.
    #[test]
    fn evaluate_is_pure(
        s in arb_sample(),
        gas_max in 0.0f32..500.0,
        temp_max in 20.0f32..50.0,
        history in proptest::collection::vec(arb_sample(), 0..10),
    ) {
        let t = Thresholds { gas_max, temp_max };
        let first = evaluate(&s, &t);

        let mut session = MonitorSession::new(&SystemConfig { thresholds: t, ..SystemConfig::default() }, Now);
        let (mut n, mut l) = (Counting(0), Counting(0));
        for h in history {
            session.observe(h, &mut n, &mut l, &mut NullSink);
        }

        prop_assert_eq!(session.evaluate(&s), first.clone());
        prop_assert_eq!(evaluate(&s, &t).message(), first.message());
    }

    /// A history never exceeds its bound and keeps the newest values in order.
    #[test]
    fn history_is_bounded(cap in 1usize..100, values in proptest::collection::vec(any::<i32>(), 0..300)) {
        let mut h = RollingHistory::new(cap);
        for v in &values {
            h.push(*v);
            prop_assert!(h.len() <= cap);
        }
        let start = values.len().saturating_sub(cap);
        prop_assert_eq!(h.to_vec(), values[start..].to_vec());
    }
}
