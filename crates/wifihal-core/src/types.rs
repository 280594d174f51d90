//! Contract identifiers and small value types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Name of one deployable, independently addressable chip service instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Opaque handle to a live chip, issued by `acquire`.
///
/// Handles are borrowed, not owned: `reset` invalidates every handle the
/// instance has issued, and stale handles answer
/// [`StatusCode::ChipInvalid`](crate::StatusCode::ChipInvalid) everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChipHandle(u32);

impl ChipHandle {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Mode identifier negotiated by `configure_for_role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChipModeId(u32);

impl ChipModeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Registration token for an event callback, chosen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u32);

impl CallbackId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Interface role a chip mode must support.
///
/// Capabilities can be mode-dependent, so a role is configured before the
/// capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum IfaceRole {
    Sta = 0,
    Ap = 1,
    P2p = 2,
    Nan = 3,
}

impl IfaceRole {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Sta),
            1 => Some(Self::Ap),
            2 => Some(Self::P2p),
            3 => Some(Self::Nan),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for IfaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sta => write!(f, "sta"),
            Self::Ap => write!(f, "ap"),
            Self::P2p => write!(f, "p2p"),
            Self::Nan => write!(f, "nan"),
        }
    }
}

/// Named operating profile constraining radio transmit power.
///
/// Selected through the gated `select_power_scenario` operation. The SAR
/// profiles (`OnHead*`, `OnBody*`) were added in contract revision 1.2;
/// `VoiceCall` dates back to 1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum TxPowerScenario {
    VoiceCall = 0,
    OnHeadCellOff = 1,
    OnHeadCellOn = 2,
    OnBodyCellOff = 3,
    OnBodyCellOn = 4,
}

impl TxPowerScenario {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::VoiceCall),
            1 => Some(Self::OnHeadCellOff),
            2 => Some(Self::OnHeadCellOn),
            3 => Some(Self::OnBodyCellOff),
            4 => Some(Self::OnBodyCellOn),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// True for the profiles that depend on body/head SAR support.
    pub fn is_sar_profile(self) -> bool {
        !matches!(self, Self::VoiceCall)
    }
}

impl fmt::Display for TxPowerScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VoiceCall => write!(f, "voice-call"),
            Self::OnHeadCellOff => write!(f, "on-head-cell-off"),
            Self::OnHeadCellOn => write!(f, "on-head-cell-on"),
            Self::OnBodyCellOff => write!(f, "on-body-cell-off"),
            Self::OnBodyCellOn => write!(f, "on-body-cell-on"),
        }
    }
}
