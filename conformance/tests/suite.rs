//! Validator behavior against reference services.
//!
//! The reference chips emit a reconfiguration event during every setup,
//! so each run here also proves unsolicited notifications never affect
//! an outcome.

use std::sync::Arc;
use std::thread;

use wifihal_conformance::driver::{Driver, Outcome};
use wifihal_core::{
    CapabilityMask, ChipController, FrameHeader, InstanceId, Response, StatusCode, Transport,
};
use wifihal_testkit::{serve_instance, FakeChip, MisbehavingChip, ServedInstance};

fn serve_fake(name: &str, caps: CapabilityMask) -> ServedInstance {
    let chip = FakeChip::new(name, caps);
    let events = chip.events().clone();
    serve_instance(Arc::new(chip), events).unwrap()
}

fn connect(served: &ServedInstance, name: &str) -> Driver {
    Driver::connect(served.addr(), InstanceId::from(name)).unwrap()
}

#[test]
fn honest_chips_pass_every_scenario() {
    let masks = [
        CapabilityMask::SET_TX_POWER_LIMIT | CapabilityMask::USE_BODY_HEAD_SAR,
        CapabilityMask::SET_TX_POWER_LIMIT,
        CapabilityMask::USE_BODY_HEAD_SAR,
        CapabilityMask::empty(),
    ];

    for mask in masks {
        let served = serve_fake("wifi0", mask);
        let mut driver = connect(&served, "wifi0");

        for (case, _rules) in wifihal_conformance::list_all() {
            let result = wifihal_conformance::run_case(&case, &mut driver);
            assert!(
                result.passed(),
                "{case} failed against mask {mask:?}: {:?}",
                result.error,
            );
        }
    }
}

#[test]
fn overclaiming_chip_is_a_violation() {
    // Advertises nothing but answers Success anyway.
    let chip = MisbehavingChip::new("wifi0", CapabilityMask::empty(), StatusCode::Success);
    let events = chip.events().clone();
    let served = serve_instance(Arc::new(chip), events).unwrap();
    let mut driver = connect(&served, "wifi0");

    let result = wifihal_conformance::run_case("power.body_sar_scenario", &mut driver);
    assert_eq!(result.outcome, Outcome::Violation);
    let error = result.error.unwrap();
    assert!(error.contains("predicts"), "unhelpful message: {error}");
}

#[test]
fn off_contract_status_is_a_violation() {
    // Busy is never an acceptable answer for a gated operation.
    let both = CapabilityMask::SET_TX_POWER_LIMIT | CapabilityMask::USE_BODY_HEAD_SAR;
    let chip = MisbehavingChip::new("wifi0", both, StatusCode::Busy);
    let events = chip.events().clone();
    let served = serve_instance(Arc::new(chip), events).unwrap();
    let mut driver = connect(&served, "wifi0");

    let result = wifihal_conformance::run_case("power.voice_call_scenario", &mut driver);
    assert_eq!(result.outcome, Outcome::Violation);
}

#[test]
fn unreachable_instance_is_a_setup_failure() {
    // The instance name does not match the served chip, so acquire is
    // refused and the operation under test never runs.
    let served = serve_fake("wifi0", CapabilityMask::SET_TX_POWER_LIMIT);
    let mut driver = connect(&served, "other");

    let result = wifihal_conformance::run_case("power.voice_call_scenario", &mut driver);
    assert_eq!(result.outcome, Outcome::SetupFailed);
    assert_eq!(result.exit_code(), 2);
}

#[test]
fn scenarios_leave_no_state_behind() {
    let served = serve_fake("wifi0", CapabilityMask::SET_TX_POWER_LIMIT);
    let mut driver = connect(&served, "wifi0");

    // Same scenario twice over one connection: the second run's opening
    // reset must see a clean instance.
    for _ in 0..2 {
        let result = wifihal_conformance::run_case("power.voice_call_scenario", &mut driver);
        assert!(result.passed(), "{:?}", result.error);
    }

    // And a different scenario right after.
    let result = wifihal_conformance::run_case("lifecycle.stale_handle", &mut driver);
    assert!(result.passed(), "{:?}", result.error);
}

#[test]
fn teardown_failure_keeps_the_body_verdict() {
    // A peer that acknowledges the opening reset, refuses acquire, then
    // goes away. The scenario body fails on setup and the teardown reset
    // fails on the dead transport; the reported outcome must stay the
    // body's.
    let (client_end, mut peer) = Transport::mem_pair();
    let answer = thread::spawn(move || {
        let (header, _) = peer.recv().unwrap();
        let body = Response::Ack.encode().unwrap();
        peer.send(FrameHeader::response(header.seq, body.len() as u32), &body)
            .unwrap();

        let (header, _) = peer.recv().unwrap();
        let body = Response::Chip {
            status: StatusCode::NotAvailable,
            chip: None,
        }
        .encode()
        .unwrap();
        peer.send(FrameHeader::response(header.seq, body.len() as u32), &body)
            .unwrap();
    });

    let controller = ChipController::new(client_end);
    let mut driver = Driver::new(controller, InstanceId::new("wifi0"));
    let result = wifihal_conformance::run_case("power.voice_call_scenario", &mut driver);

    assert_eq!(result.outcome, Outcome::SetupFailed);
    let error = result.error.unwrap();
    assert!(
        error.contains("acquire") && !error.contains("teardown"),
        "wrong failure surfaced: {error}"
    );
    answer.join().unwrap();
}

#[test]
fn unknown_scenario_is_a_setup_failure() {
    // Lookup fails before anything touches the wire, so a connected
    // service is not needed.
    let (client_end, _server_end) = Transport::mem_pair();
    let controller = ChipController::new(client_end);
    let mut driver = Driver::new(controller, InstanceId::new("wifi0"));

    let result = wifihal_conformance::run_case("power.no_such_scenario", &mut driver);
    assert_eq!(result.outcome, Outcome::SetupFailed);
    assert!(result.error.unwrap().contains("unknown scenario"));
}
