//! Behavioral tests for the readiness gate.

use std::sync::atomic::Ordering;
use std::time::Duration;

use db_gate::config::schema::GateSettings;
use db_gate::gate::{GateError, ReadinessGate};
use db_gate::probe::ProbeError;

mod common;
use common::{RecordingDelay, ScriptedProbe, Step};

#[tokio::test]
async fn ready_on_first_probe_makes_no_pause() {
    let probe = ScriptedProbe::new(vec![Step::Ready]);
    let delay = RecordingDelay::default();
    let gate = ReadinessGate::new(&probe, &delay, &GateSettings::default());

    gate.wait().await.expect("gate should report ready");

    assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    assert!(delay.pauses.lock().unwrap().is_empty());
}

#[tokio::test]
async fn retries_through_both_unavailability_stages() {
    // Server not listening for 2 attempts, then listening but the database
    // not yet serving for 3 more, then ready.
    let probe = ScriptedProbe::new(vec![
        Step::Unreachable,
        Step::Unreachable,
        Step::NotReady,
        Step::NotReady,
        Step::NotReady,
        Step::Ready,
    ]);
    let delay = RecordingDelay::default();
    let gate = ReadinessGate::new(&probe, &delay, &GateSettings::default());

    gate.wait().await.expect("gate should report ready");

    assert_eq!(probe.calls.load(Ordering::SeqCst), 6);
    assert_eq!(delay.pauses.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn fatal_probe_error_propagates_without_retry() {
    let probe = ScriptedProbe::new(vec![Step::Fatal("permission denied")]);
    let delay = RecordingDelay::default();
    let gate = ReadinessGate::new(&probe, &delay, &GateSettings::default());

    let err = gate.wait().await.expect_err("gate should fail");

    assert!(matches!(err, GateError::Probe(ProbeError::Fatal(_))));
    assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    assert!(delay.pauses.lock().unwrap().is_empty());
}

#[tokio::test]
async fn every_probe_targets_the_configured_connection() {
    let probe = ScriptedProbe::new(vec![Step::Unreachable, Step::NotReady, Step::Ready]);
    let delay = RecordingDelay::default();
    let gate = ReadinessGate::new(&probe, &delay, &GateSettings::default());

    gate.wait().await.expect("gate should report ready");

    let names = probe.names.lock().unwrap();
    assert_eq!(names.len(), 3);
    assert!(names.iter().all(|name| name == "default"));
}

#[tokio::test]
async fn probes_a_renamed_target_connection() {
    let probe = ScriptedProbe::new(vec![Step::Ready]);
    let delay = RecordingDelay::default();
    let settings = GateSettings {
        connection: "replica".to_string(),
        ..GateSettings::default()
    };
    let gate = ReadinessGate::new(&probe, &delay, &settings);

    gate.wait().await.expect("gate should report ready");

    let names = probe.names.lock().unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0], "replica");
}

#[tokio::test]
async fn pauses_for_the_configured_interval() {
    let probe = ScriptedProbe::new(vec![Step::NotReady, Step::Ready]);
    let delay = RecordingDelay::default();
    let settings = GateSettings {
        interval_ms: 250,
        ..GateSettings::default()
    };
    let gate = ReadinessGate::new(&probe, &delay, &settings);

    gate.wait().await.expect("gate should report ready");

    assert_eq!(
        *delay.pauses.lock().unwrap(),
        vec![Duration::from_millis(250)]
    );
}

#[tokio::test]
async fn bounded_gate_exhausts_after_max_attempts() {
    let probe = ScriptedProbe::new(vec![
        Step::Unreachable,
        Step::Unreachable,
        Step::Unreachable,
    ]);
    let delay = RecordingDelay::default();
    let settings = GateSettings {
        max_attempts: Some(3),
        ..GateSettings::default()
    };
    let gate = ReadinessGate::new(&probe, &delay, &settings);

    let err = gate.wait().await.expect_err("gate should give up");

    assert!(matches!(err, GateError::Exhausted { attempts: 3 }));
    assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
    // No pause after the final attempt.
    assert_eq!(delay.pauses.lock().unwrap().len(), 2);
}
