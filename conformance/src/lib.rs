//! wifihal conformance suite.
//!
//! Validates that a chip service implements the capability-gated control
//! contract. Each scenario drives the service through a full
//! `reset → acquire → configure → query capabilities → invoke → assert →
//! reset` cycle and checks the returned status against what the
//! advertised capability mask predicts.
//!
//! # Usage
//!
//! Run one scenario against a live instance:
//!
//! ```bash
//! wifihal-conformance --case power.body_sar_scenario --instance wifi0=127.0.0.1:9000
//! ```
//!
//! The validator exits with:
//! - 0: scenario passed
//! - 1: contract violation (status did not match the prediction)
//! - 2: setup or internal error (the operation under test never ran)

pub mod driver;
pub mod gating;
pub mod scenarios;

use driver::{Driver, TestResult};

/// A registered conformance scenario.
///
/// Scenarios are registered with `inventory::submit!` next to their
/// function and named `category.case`.
pub struct Scenario {
    /// The scenario name, e.g. `power.body_sar_scenario`.
    pub name: &'static str,
    /// The contract clauses this scenario verifies.
    pub rules: &'static [&'static str],
    /// The scenario body. Runs between the driver's setup and teardown
    /// resets.
    pub run: fn(&mut Driver) -> TestResult,
}

inventory::collect!(Scenario);

/// Look up a scenario by name.
pub fn find(name: &str) -> Option<&'static Scenario> {
    inventory::iter::<Scenario>.into_iter().find(|s| s.name == name)
}

/// Run a scenario by name, with the full reset-bracketed cycle.
pub fn run_case(name: &str, driver: &mut Driver) -> TestResult {
    match find(name) {
        Some(scenario) => driver::run_scenario(scenario, driver),
        None => TestResult::setup_failed(format!("unknown scenario: {name}")),
    }
}

/// All scenarios with their rules, sorted by name.
pub fn list_all() -> Vec<(String, Vec<&'static str>)> {
    let mut scenarios: Vec<_> = inventory::iter::<Scenario>
        .into_iter()
        .map(|s| (s.name.to_string(), s.rules.to_vec()))
        .collect();
    scenarios.sort();
    scenarios
}

/// Scenarios for one category (e.g. "power"), sorted by name.
pub fn list_category(category: &str) -> Vec<(String, Vec<&'static str>)> {
    let prefix = format!("{category}.");
    let mut scenarios: Vec<_> = inventory::iter::<Scenario>
        .into_iter()
        .filter(|s| s.name.starts_with(&prefix))
        .map(|s| (s.name.to_string(), s.rules.to_vec()))
        .collect();
    scenarios.sort();
    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_expected_scenario_is_registered() {
        for name in [
            "power.body_sar_scenario",
            "power.voice_call_scenario",
            "callback.register",
            "lifecycle.reset_idempotent",
            "lifecycle.stale_handle",
        ] {
            assert!(find(name).is_some(), "{name} not registered");
        }
    }

    #[test]
    fn listing_is_sorted_and_category_filtered() {
        let all = list_all();
        assert!(all.len() >= 5);
        let names: Vec<_> = all.iter().map(|(n, _)| n.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let power = list_category("power");
        assert_eq!(power.len(), 2);
        assert!(power.iter().all(|(n, _)| n.starts_with("power.")));
    }

    #[test]
    fn every_scenario_names_its_rules() {
        for scenario in inventory::iter::<Scenario> {
            assert!(
                !scenario.rules.is_empty(),
                "{} has no rules",
                scenario.name
            );
        }
    }
}
