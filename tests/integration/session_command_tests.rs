//! Command handling: observe via command, runtime threshold updates.

use smartsensor::alert::state::Edge;
use smartsensor::app::commands::AppCommand;
use smartsensor::app::events::AppEvent;
use smartsensor::app::service::MonitorSession;
use smartsensor::config::{SystemConfig, Thresholds};
use smartsensor::sensors::{SensorSample, TiltStatus};

use super::mock_ports::{FixedClock, MockLedger, MockNotifier, VecSink};

#[test]
fn start_emits_started_event() {
    let mut session = MonitorSession::new(&SystemConfig::default(), FixedClock);
    let mut sink = VecSink::new();
    session.start(&mut sink);
    assert!(matches!(
        sink.events.as_slice(),
        [AppEvent::Started { history_len: 100, .. }]
    ));
}

#[test]
fn observe_command_returns_report() {
    let mut session = MonitorSession::new(&SystemConfig::default(), FixedClock);
    let (mut n, mut l, mut sink) = (MockNotifier::new(), MockLedger::new(), VecSink::new());

    let report = session
        .handle_command(
            AppCommand::Observe(SensorSample::new(100.0, 30.0, TiltStatus::TiltDetected)),
            &mut n,
            &mut l,
            &mut sink,
        )
        .expect("observe yields a report");
    assert_eq!(report.cycle, 1);
    assert_eq!(report.edge, Some(Edge::Rising));
    assert_eq!(n.calls, vec!["⚠️ Tilt Detected! Possible instability.\n".to_string()]);
}

#[test]
fn lowering_threshold_raises_on_next_sample_only() {
    let mut session = MonitorSession::new(&SystemConfig::default(), FixedClock);
    let (mut n, mut l, mut sink) = (MockNotifier::new(), MockLedger::new(), VecSink::new());
    let sample = SensorSample::new(150.0, 30.0, TiltStatus::Stable);

    session.observe(sample, &mut n, &mut l, &mut sink);
    assert!(!session.is_alarmed());

    let none = session.handle_command(
        AppCommand::UpdateThresholds(Thresholds {
            gas_max: 120.0,
            temp_max: 40.0,
        }),
        &mut n,
        &mut l,
        &mut sink,
    );
    assert!(none.is_none());
    // Updating thresholds alone never dispatches.
    assert!(n.calls.is_empty());
    assert!(!session.is_alarmed());
    assert!((session.thresholds().gas_max - 120.0).abs() < f32::EPSILON);

    let report = session.observe(sample, &mut n, &mut l, &mut sink);
    assert_eq!(report.edge, Some(Edge::Rising));
    assert_eq!(n.calls.len(), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ThresholdsUpdated(_))), 1);
}

#[test]
fn history_bound_follows_config() {
    let config = SystemConfig {
        history_len: 3,
        ..SystemConfig::default()
    };
    let mut session = MonitorSession::new(&config, FixedClock);
    let (mut n, mut l, mut sink) = (MockNotifier::new(), MockLedger::new(), VecSink::new());
    for gas in [10.0, 20.0, 30.0, 40.0] {
        session.observe(SensorSample::new(gas, 25.0, TiltStatus::Stable), &mut n, &mut l, &mut sink);
    }
    assert_eq!(session.intake().gas_history().to_vec(), vec![20.0, 30.0, 40.0]);
    assert_eq!(session.intake().temperature_history().len(), 3);
    assert_eq!(session.cycle_count(), 4);
}

#[test]
fn non_finite_threshold_update_keeps_gas_alarm_armed() {
    let mut session = MonitorSession::new(&SystemConfig::default(), FixedClock);
    let (mut n, mut l, mut sink) = (MockNotifier::new(), MockLedger::new(), VecSink::new());

    for gas_max in [f32::NAN, f32::INFINITY] {
        let cmd = AppCommand::UpdateThresholds(Thresholds {
            gas_max,
            temp_max: 40.0,
        });
        assert!(session.handle_command(cmd, &mut n, &mut l, &mut sink).is_none());
    }
    assert_eq!(session.thresholds(), Thresholds::default());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ThresholdsUpdated(_))), 0);

    let report = session.observe(SensorSample::new(500.0, 30.0, TiltStatus::Stable), &mut n, &mut l, &mut sink);
    assert_eq!(report.edge, Some(Edge::Rising));
}
