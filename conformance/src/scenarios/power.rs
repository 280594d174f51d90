//! Transmit-power scenario gating.

use wifihal_core::TxPowerScenario;

use crate::driver::{Driver, TestResult};
use crate::gating::power_scenario_gate;
use crate::Scenario;

/// Shared body: bring the chip up as a station, predict the gated
/// status from the queried mask, invoke, compare.
fn power_scenario_case(driver: &mut Driver, scenario: TxPowerScenario) -> TestResult {
    let setup = match driver.configured_sta() {
        Ok(setup) => setup,
        Err(e) => return TestResult::setup_failed(format!("setup failed: {e}")),
    };

    let gate = power_scenario_gate(scenario);
    let predicted = gate.predict(setup.caps);

    let actual = match driver.controller().select_power_scenario(setup.chip, scenario) {
        Ok(status) => status,
        Err(e) => {
            return TestResult::setup_failed(format!("select_power_scenario({scenario}): {e}"))
        }
    };

    if actual == predicted {
        TestResult::pass()
    } else {
        TestResult::violation(format!(
            "select_power_scenario({scenario}) answered {actual}; mask {:?} predicts {predicted}",
            setup.caps,
        ))
    }
}

// =============================================================================
// power.body_sar_scenario
// =============================================================================
// Rules: power.gating.sar-strict, gating.binary-status
//
// OnBodyCellOff is a SAR profile: it is supported only when the chip
// advertises BOTH transmit-power limiting and the body/head SAR tables.
// Either bit alone must yield NotSupported.

pub fn body_sar_scenario(driver: &mut Driver) -> TestResult {
    power_scenario_case(driver, TxPowerScenario::OnBodyCellOff)
}

inventory::submit! {
    Scenario {
        name: "power.body_sar_scenario",
        rules: &["power.gating.sar-strict", "gating.binary-status"],
        run: body_sar_scenario,
    }
}

// =============================================================================
// power.voice_call_scenario
// =============================================================================
// Rules: power.gating.voice-overlap, gating.binary-status
//
// VoiceCall only constrains transmit power, so SET_TX_POWER_LIMIT alone
// decides it; the SAR bit is irrelevant.

pub fn voice_call_scenario(driver: &mut Driver) -> TestResult {
    power_scenario_case(driver, TxPowerScenario::VoiceCall)
}

inventory::submit! {
    Scenario {
        name: "power.voice_call_scenario",
        rules: &["power.gating.voice-overlap", "gating.binary-status"],
        run: voice_call_scenario,
    }
}
