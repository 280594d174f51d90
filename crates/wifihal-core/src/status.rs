//! Status codes returned by contract operations.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Synchronous result of a contract operation.
///
/// Wire values are frozen by contract revision 1.0 and are never reused.
/// Gated operations may only answer [`StatusCode::Success`] or
/// [`StatusCode::NotSupported`]; the remaining codes cover handle and
/// lifecycle misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum StatusCode {
    Success = 0,
    /// The supplied chip handle does not name a live chip.
    ChipInvalid = 1,
    /// The supplied iface handle does not name a live iface.
    IfaceInvalid = 2,
    /// The operation (or the requested argument) is not supported.
    NotSupported = 3,
    /// Supported but not available right now (e.g. concurrency limits).
    NotAvailable = 4,
    /// The instance has not been started by `acquire`.
    NotStarted = 5,
    InvalidArgs = 6,
    Busy = 7,
    Unknown = 8,
}

impl StatusCode {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Success),
            1 => Some(Self::ChipInvalid),
            2 => Some(Self::IfaceInvalid),
            3 => Some(Self::NotSupported),
            4 => Some(Self::NotAvailable),
            5 => Some(Self::NotStarted),
            6 => Some(Self::InvalidArgs),
            7 => Some(Self::Busy),
            8 => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// True for the only code that reports the operation took effect.
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ChipInvalid => write!(f, "chip handle invalid"),
            Self::IfaceInvalid => write!(f, "iface handle invalid"),
            Self::NotSupported => write!(f, "not supported"),
            Self::NotAvailable => write!(f, "not available"),
            Self::NotStarted => write!(f, "not started"),
            Self::InvalidArgs => write!(f, "invalid arguments"),
            Self::Busy => write!(f, "busy"),
            Self::Unknown => write!(f, "unknown error"),
        }
    }
}
