//! Instance lifecycle: reset semantics and handle invalidation.

use wifihal_core::{StatusCode, TxPowerScenario};

use crate::driver::{Driver, TestResult};
use crate::Scenario;

// =============================================================================
// lifecycle.reset_idempotent
// =============================================================================
// Rules: lifecycle.reset-idempotent, caps.stable-across-reset
//
// Resetting twice must leave the instance in the same clean state as
// resetting once: a full cycle afterwards observes the same capability
// mask.

pub fn reset_idempotent(driver: &mut Driver) -> TestResult {
    let first = match driver.configured_sta() {
        Ok(setup) => setup,
        Err(e) => return TestResult::setup_failed(format!("first cycle setup failed: {e}")),
    };

    if let Err(e) = driver.reset_instance() {
        return TestResult::setup_failed(format!("reset failed: {e}"));
    }
    if let Err(e) = driver.reset_instance() {
        return TestResult::setup_failed(format!("repeated reset failed: {e}"));
    }

    let second = match driver.configured_sta() {
        Ok(setup) => setup,
        Err(e) => return TestResult::setup_failed(format!("second cycle setup failed: {e}")),
    };

    if first.caps == second.caps {
        TestResult::pass()
    } else {
        TestResult::violation(format!(
            "capability mask changed across reset: {:?} then {:?}",
            first.caps, second.caps,
        ))
    }
}

inventory::submit! {
    Scenario {
        name: "lifecycle.reset_idempotent",
        rules: &["lifecycle.reset-idempotent", "caps.stable-across-reset"],
        run: reset_idempotent,
    }
}

// =============================================================================
// lifecycle.stale_handle
// =============================================================================
// Rules: lifecycle.reset-invalidates-handles
//
// Reset invalidates every handle the instance has issued. A handle from
// before the reset must answer ChipInvalid, whatever the operation.

pub fn stale_handle(driver: &mut Driver) -> TestResult {
    let setup = match driver.configured_sta() {
        Ok(setup) => setup,
        Err(e) => return TestResult::setup_failed(format!("setup failed: {e}")),
    };

    if let Err(e) = driver.reset_instance() {
        return TestResult::setup_failed(format!("reset failed: {e}"));
    }

    let status = match driver
        .controller()
        .select_power_scenario(setup.chip, TxPowerScenario::VoiceCall)
    {
        Ok(status) => status,
        Err(e) => return TestResult::setup_failed(format!("select_power_scenario: {e}")),
    };

    if status == StatusCode::ChipInvalid {
        TestResult::pass()
    } else {
        TestResult::violation(format!(
            "stale handle answered {status}; a reset handle must answer {}",
            StatusCode::ChipInvalid,
        ))
    }
}

inventory::submit! {
    Scenario {
        name: "lifecycle.stale_handle",
        rules: &["lifecycle.reset-invalidates-handles"],
        run: stale_handle,
    }
}
