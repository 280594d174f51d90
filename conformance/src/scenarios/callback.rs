//! Event callback registration.

use std::sync::Arc;

use wifihal_core::{NullObserver, StatusCode};

use crate::driver::{Driver, TestResult};
use crate::Scenario;

// =============================================================================
// callback.register
// =============================================================================
// Rules: callback.registration-binary, callback.delivery-unverified
//
// Registering a passive observer must answer Success or NotSupported;
// any other status is a violation. Whether notifications are actually
// delivered afterwards is asynchronous and deliberately not asserted.

pub fn register(driver: &mut Driver) -> TestResult {
    let setup = match driver.configured_sta() {
        Ok(setup) => setup,
        Err(e) => return TestResult::setup_failed(format!("setup failed: {e}")),
    };

    match driver
        .controller()
        .register_callback(setup.chip, Arc::new(NullObserver))
    {
        Ok(StatusCode::Success) | Ok(StatusCode::NotSupported) => TestResult::pass(),
        Ok(other) => TestResult::violation(format!(
            "register_callback answered {other}; only success or not-supported is acceptable",
        )),
        Err(e) => TestResult::setup_failed(format!("register_callback: {e}")),
    }
}

inventory::submit! {
    Scenario {
        name: "callback.register",
        rules: &["callback.registration-binary", "callback.delivery-unverified"],
        run: register,
    }
}
