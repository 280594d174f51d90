//! Scenario driver: the per-scenario cycle and its result type.
//!
//! Every scenario runs as
//! `reset → acquire → configure → query capabilities → invoke → assert →
//! reset`. The terminal reset runs whatever the outcome, so a failing
//! scenario cannot leak state into the next one.

use std::net::ToSocketAddrs;

use tracing::{debug, info, warn};

use wifihal_core::{
    CapabilityMask, ChipController, ChipHandle, ChipModeId, ClientError, IfaceRole, InstanceId,
};

use crate::Scenario;

/// How a scenario run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every checked status matched its prediction.
    Pass,
    /// The service answered a status the capability mask does not allow.
    Violation,
    /// Setup never completed; the operation under test was not attempted.
    SetupFailed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Violation => "violation",
            Outcome::SetupFailed => "setup-failed",
        }
    }
}

/// Result of running a scenario.
pub struct TestResult {
    /// How the run ended.
    pub outcome: Outcome,
    /// Error message unless it passed.
    pub error: Option<String>,
}

impl TestResult {
    /// Create a passing result.
    pub fn pass() -> Self {
        Self {
            outcome: Outcome::Pass,
            error: None,
        }
    }

    /// Create a contract-violation result with an error message.
    pub fn violation(msg: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Violation,
            error: Some(msg.into()),
        }
    }

    /// Create a setup-failure result with an error message.
    pub fn setup_failed(msg: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::SetupFailed,
            error: Some(msg.into()),
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }

    /// Process exit code for this result: 0 passed, 1 violation,
    /// 2 setup or internal error.
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            Outcome::Pass => 0,
            Outcome::Violation => 1,
            Outcome::SetupFailed => 2,
        }
    }
}

/// A chip brought through setup: handle, negotiated mode and the
/// capability mask queried for that mode.
pub struct ConfiguredChip {
    pub chip: ChipHandle,
    pub mode: ChipModeId,
    pub caps: CapabilityMask,
}

/// Connection to one chip service instance under test.
pub struct Driver {
    controller: ChipController,
    instance: InstanceId,
}

impl Driver {
    pub fn new(controller: ChipController, instance: InstanceId) -> Self {
        Self {
            controller,
            instance,
        }
    }

    /// Connect to the instance served at `addr`.
    pub fn connect<A: ToSocketAddrs>(addr: A, instance: InstanceId) -> Result<Self, ClientError> {
        Ok(Self::new(ChipController::connect(addr)?, instance))
    }

    pub fn instance(&self) -> &InstanceId {
        &self.instance
    }

    pub fn controller(&mut self) -> &mut ChipController {
        &mut self.controller
    }

    /// Reset the instance under test.
    pub fn reset_instance(&mut self) -> Result<(), ClientError> {
        self.controller.reset(&self.instance)
    }

    /// Setup common to most scenarios: acquire a handle, configure for
    /// the station role, query the capabilities of the negotiated mode.
    /// Any failure here is fatal to the scenario.
    pub fn configured_sta(&mut self) -> Result<ConfiguredChip, ClientError> {
        let chip = self.controller.acquire(&self.instance)?;
        let mode = self.controller.configure_for_role(chip, IfaceRole::Sta)?;
        let caps = self.controller.query_capabilities(chip, mode)?;
        debug!(chip = chip.get(), mode = mode.get(), caps = ?caps, "setup complete");
        Ok(ConfiguredChip { chip, mode, caps })
    }
}

/// Run one scenario with its reset bracket.
///
/// The scenario body runs between two resets. The closing reset runs
/// regardless of the body's outcome; if the body passed but the closing
/// reset fails, the run is reported as a setup failure because the next
/// scenario's precondition could not be established. After a failed body
/// a teardown failure is logged without replacing the body's verdict.
pub fn run_scenario(scenario: &Scenario, driver: &mut Driver) -> TestResult {
    info!(scenario = scenario.name, instance = %driver.instance, "running");

    if let Err(e) = driver.reset_instance() {
        return TestResult::setup_failed(format!("initial reset failed: {e}"));
    }

    let result = (scenario.run)(driver);

    if let Err(e) = driver.reset_instance() {
        if result.passed() {
            return TestResult::setup_failed(format!("teardown reset failed: {e}"));
        }
        // Keep the body's verdict; the teardown failure goes to the log.
        warn!(error = %e, "teardown reset failed after scenario failure");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_the_outcome() {
        assert_eq!(TestResult::pass().exit_code(), 0);
        assert_eq!(TestResult::violation("x").exit_code(), 1);
        assert_eq!(TestResult::setup_failed("x").exit_code(), 2);
    }

    #[test]
    fn only_pass_is_passed() {
        assert!(TestResult::pass().passed());
        assert!(!TestResult::violation("x").passed());
        assert!(!TestResult::setup_failed("x").passed());
    }
}
