//! Collaborator failures never block each other, the log append, or the
//! committed state flip.

use smartsensor::alert::log::AlertKind;
use smartsensor::alert::state::Edge;
use smartsensor::app::events::AppEvent;
use smartsensor::app::service::{MonitorSession, Notice};
use smartsensor::config::SystemConfig;
use smartsensor::error::{LedgerError, NotifyError};
use smartsensor::sensors::{SensorSample, TiltStatus};

use super::mock_ports::{FixedClock, MockLedger, MockNotifier, VecSink};

fn gas_breach() -> SensorSample {
    SensorSample::new(250.0, 30.0, TiltStatus::Stable)
}

fn calm() -> SensorSample {
    SensorSample::new(100.0, 30.0, TiltStatus::Stable)
}

#[test]
fn notifier_failure_still_records_and_logs() {
    let mut session = MonitorSession::new(&SystemConfig::default(), FixedClock);
    let mut notifier = MockNotifier::failing(NotifyError::Transport("connection reset".into()));
    let mut ledger = MockLedger::new();
    let mut sink = VecSink::new();

    let report = session.observe(gas_breach(), &mut notifier, &mut ledger, &mut sink);

    assert_eq!(report.edge, Some(Edge::Rising));
    assert_eq!(notifier.calls.len(), 1);
    assert_eq!(ledger.calls.len(), 1, "ledger must be attempted after notifier failure");
    assert_eq!(session.alert_log().count(AlertKind::Alert), 1);
    assert!(session.is_alarmed());
    assert_eq!(session.ledger_records().len(), 1);

    assert!(report.notices.iter().any(|n| matches!(n, Notice::NotifyFailed(_))));
    assert!(
        report
            .notices
            .iter()
            .any(|n| matches!(n, Notice::LedgerRecorded { block_number: 1, .. }))
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::NotifyFailed(_))), 1);
}

#[test]
fn ledger_failure_still_notifies_and_logs() {
    let mut session = MonitorSession::new(&SystemConfig::default(), FixedClock);
    let mut notifier = MockNotifier::new();
    let mut ledger = MockLedger::failing(LedgerError::ConfirmationTimeout {
        tx_hash: "0xdead".into(),
        waited_secs: 60,
    });
    let mut sink = VecSink::new();

    let report = session.observe(gas_breach(), &mut notifier, &mut ledger, &mut sink);

    assert_eq!(notifier.calls.len(), 1);
    assert_eq!(ledger.calls.len(), 1);
    assert_eq!(session.alert_log().len(), 1);
    assert!(session.ledger_records().is_empty());
    assert_eq!(report.notices.len(), 1);
    assert!(matches!(
        report.notices[0],
        Notice::LedgerFailed(LedgerError::ConfirmationTimeout { .. })
    ));
}

#[test]
fn both_failing_does_not_roll_back_state() {
    let mut session = MonitorSession::new(&SystemConfig::default(), FixedClock);
    let mut notifier = MockNotifier::failing(NotifyError::Rejected {
        status: 401,
        reason: "Unauthorized".into(),
    });
    let mut ledger = MockLedger::failing(LedgerError::InsufficientBalance("empty".into()));
    let mut sink = VecSink::new();

    session.observe(gas_breach(), &mut notifier, &mut ledger, &mut sink);
    assert!(session.is_alarmed());

    // The next identical sample is steady state: nothing is retried.
    let report = session.observe(gas_breach(), &mut notifier, &mut ledger, &mut sink);
    assert_eq!(report.edge, None);
    assert!(report.notices.is_empty());
    assert_eq!(notifier.calls.len(), 1);
    assert_eq!(ledger.calls.len(), 1);

    // Falling edge is still dispatched to both.
    let report = session.observe(calm(), &mut notifier, &mut ledger, &mut sink);
    assert_eq!(report.edge, Some(Edge::Falling));
    assert_eq!(notifier.calls.len(), 2);
    assert_eq!(ledger.calls.len(), 2);
    assert_eq!(session.alert_log().len(), 2);
    assert_eq!(report.notices.len(), 2);
    assert!(report.notices.iter().all(Notice::is_error));
}

#[test]
fn out_of_range_input_is_a_notice_not_a_failure() {
    let mut session = MonitorSession::new(&SystemConfig::default(), FixedClock);
    let mut notifier = MockNotifier::new();
    let mut ledger = MockLedger::new();
    let mut sink = VecSink::new();

    let report = session.observe(
        SensorSample::new(900.0, 30.0, TiltStatus::Stable),
        &mut notifier,
        &mut ledger,
        &mut sink,
    );

    assert!(report.alarmed());
    assert_eq!(report.edge, Some(Edge::Rising));
    assert!(matches!(report.notices[0], Notice::InputOutOfRange(_)));
    assert_eq!(session.intake().gas_history().to_vec(), vec![900.0]);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::InputOutOfRange(_))), 1);
}
