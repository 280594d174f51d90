//! Capability gating rules.
//!
//! A gated operation must answer `Success` when the advertised mask
//! satisfies its gate and `NotSupported` when it does not; no third
//! status is ever acceptable. Whether a gate wants every required bit or
//! any of them is a fixed property of each (operation, argument) pair,
//! kept here as a table.

use wifihal_core::{CapabilityMask, StatusCode, TxPowerScenario};

/// How the required bits are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatingRule {
    /// Every required bit must be advertised.
    AllOf,
    /// At least one required bit must be advertised.
    AnyOf,
}

/// The gate for one (operation, argument) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub required: CapabilityMask,
    pub rule: GatingRule,
}

impl Gate {
    pub const fn all_of(required: CapabilityMask) -> Self {
        Self {
            required,
            rule: GatingRule::AllOf,
        }
    }

    pub const fn any_of(required: CapabilityMask) -> Self {
        Self {
            required,
            rule: GatingRule::AnyOf,
        }
    }

    /// Whether `mask` satisfies this gate.
    pub fn admits(&self, mask: CapabilityMask) -> bool {
        match self.rule {
            GatingRule::AllOf => mask.contains(self.required),
            GatingRule::AnyOf => mask.intersects(self.required),
        }
    }

    /// The only status a conforming service may answer under `mask`.
    pub fn predict(&self, mask: CapabilityMask) -> StatusCode {
        if self.admits(mask) {
            StatusCode::Success
        } else {
            StatusCode::NotSupported
        }
    }
}

/// Gate for `select_power_scenario` with the given argument.
///
/// SAR profiles require transmit-power limiting plus the body/head SAR
/// tables; a plain voice-call constraint needs only the former.
pub fn power_scenario_gate(scenario: TxPowerScenario) -> Gate {
    if scenario.is_sar_profile() {
        Gate::all_of(CapabilityMask::SET_TX_POWER_LIMIT.union(CapabilityMask::USE_BODY_HEAD_SAR))
    } else {
        Gate::any_of(CapabilityMask::SET_TX_POWER_LIMIT)
    }
}
