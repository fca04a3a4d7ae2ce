//! Integration tests: noise, clock wraparound, and collaborator failures.

use mouldmon::app::events::{InputRole, MonitorEvent};
use mouldmon::config::MonitorConfig;
use mouldmon::error::{DispatchError, SampleError};
use mouldmon::pins::{MACHINE1_AVAILABILITY_GPIO as AVAIL, MACHINE1_COMPLETION_GPIO as DONE};
use mouldmon::signal::{Edge, Level};

use super::mock_hw::{M1, Rig};

#[test]
fn chattering_input_never_reports_on() {
    let mut rig = Rig::new();
    rig.run_for(1000);
    for i in 0..100 {
        rig.inputs.set(AVAIL, i % 2 == 1);
        rig.run_for(20);
    }
    assert_eq!(rig.count(M1, "on"), 0);
    assert_eq!(
        rig.service.machines()[0].availability().stable_level(),
        Level::Inactive
    );

    // Settles active: exactly one On.
    rig.inputs.set(AVAIL, false);
    rig.run_for(500);
    assert_eq!(rig.count(M1, "on"), 1);
}

#[test]
fn chattering_completion_never_counts_parts() {
    let mut rig = Rig::new();
    rig.run_for(1000);
    for i in 0..200 {
        rig.inputs.set(DONE, i % 3 == 0);
        rig.run_for(15);
    }
    assert_eq!(rig.count(M1, "good_parts_completed"), 0);
}

#[test]
fn spike_on_held_completion_is_not_a_second_part() {
    let mut rig = Rig::new();
    rig.run_for(1000);
    rig.inputs.set(DONE, false);
    rig.run_for(2000);
    rig.inputs.set(DONE, true);
    rig.run_for(10);
    rig.inputs.set(DONE, false);
    rig.run_for(2000);

    assert_eq!(rig.count(M1, "good_parts_completed"), 1);
    assert_eq!(
        rig.service.machines()[0].completion().stable_level(),
        Level::Active
    );
}

#[test]
fn spike_on_held_availability_sends_no_extra_on() {
    let mut rig = Rig::new();
    rig.run_for(1000);
    rig.inputs.set(AVAIL, false);
    rig.run_for(2000);
    rig.inputs.set(AVAIL, true);
    rig.run_for(10);
    rig.inputs.set(AVAIL, false);
    rig.run_for(2000);

    assert_eq!(rig.times_of(M1, "on"), vec![1055]);
    assert_eq!(rig.count(M1, "off"), 1);
}

#[test]
fn edges_debounce_across_clock_wrap() {
    let start = u32::MAX - 1019;
    let mut rig = Rig::with(MonitorConfig::default(), start);
    rig.run_for(1000);
    assert_eq!(rig.times_of(M1, "off"), vec![start + 55]);
    assert_eq!(rig.now(), u32::MAX - 19);

    rig.inputs.set(AVAIL, false);
    rig.run_for(100);
    // Change at -20 ms, accepted 55 ms later on the far side of the wrap.
    assert_eq!(rig.times_of(M1, "on"), vec![35]);
}

#[test]
fn resend_period_spans_clock_wrap() {
    let mut config = MonitorConfig::default();
    config.resend_period_ms = 1000;
    let start = u32::MAX - 499;
    let mut rig = Rig::with(config, start);
    rig.run_for(1200);
    // Boot Off at start+55, resend 1005 ms later, after the wrap.
    assert_eq!(
        rig.times_of(M1, "off"),
        vec![start + 55, (start + 55).wrapping_add(1005)]
    );
}

#[test]
fn transport_failure_is_not_retried_until_resend() {
    let mut rig = Rig::new();
    rig.set_link_down(true);
    rig.run_for(30_000);

    assert_eq!(rig.wire_log().writes.len(), 1);
    let stats = rig.service.stats();
    assert_eq!(stats.dispatch_failures, 1);
    assert_eq!(stats.off_sent, 0);
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        MonitorEvent::DispatchFailed {
            error: DispatchError::Transport,
            ..
        }
    )));

    // Link back: the periodic resend repairs the host's view.
    rig.set_link_down(false);
    rig.run_for(31_000);
    assert_eq!(rig.wire_log().writes.len(), 2);
    assert_eq!(rig.service.stats().off_sent, 1);
}

#[test]
fn lost_completion_is_not_resent() {
    let mut rig = Rig::new();
    rig.run_for(1000);
    rig.set_link_down(true);
    rig.pulse(DONE, 100, 200);
    rig.set_link_down(false);
    rig.run_for(5000);

    let good = br#"{"InjectionMouldingMachine1_good_parts_completed":null}"#;
    let attempts = rig
        .wire_log()
        .writes
        .iter()
        .filter(|w| w.as_slice() == good)
        .count();
    assert_eq!(attempts, 1);
}

#[test]
fn failed_read_holds_previous_level() {
    let mut rig = Rig::new();
    rig.run_for(1000);
    rig.inputs.set(AVAIL, false);
    rig.inputs.fail(AVAIL, true);
    rig.run_for(500);
    assert_eq!(rig.count(M1, "on"), 0);
    assert!(rig.service.stats().sample_failures >= 100);
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        MonitorEvent::SampleFailed {
            error: SampleError::GpioReadFailed(AVAIL)
        }
    )));

    rig.inputs.fail(AVAIL, false);
    rig.run_for(500);
    assert_eq!(rig.count(M1, "on"), 1);
}

#[test]
fn every_edge_is_reported_to_sink() {
    let mut rig = Rig::new();
    rig.run_for(1000);
    rig.pulse(AVAIL, 200, 200);

    let avail_edges: Vec<Edge> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            MonitorEvent::EdgeDetected {
                input: InputRole::Availability,
                edge,
                ..
            } => Some(*edge),
            _ => None,
        })
        .collect();
    assert_eq!(avail_edges, vec![Edge::Negative, Edge::Positive, Edge::Negative]);
    assert!(matches!(
        rig.sink.events[0],
        MonitorEvent::Started { machines: 1 }
    ));
}
