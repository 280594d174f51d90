//! Request, response and event payloads.
//!
//! Payloads are serialized with postcard. Identifiers travel as raw
//! integers; the typed wrappers ([`ChipHandle`](crate::ChipHandle) and
//! friends) live at the client and service API surface.

use serde::{Deserialize, Serialize};

use crate::wire::MAX_BODY_LEN;
use crate::{DecodeError, EncodeError, IfaceRole, StatusCode, TxPowerScenario};

/// Client-to-service operations, one variant per contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// Force the named instance to a clean, stopped state. Idempotent;
    /// acknowledged even when the instance is already stopped.
    Reset { instance: String },
    /// Start the named instance and obtain a chip handle.
    Acquire { instance: String },
    /// Put the chip into a mode supporting the requested role.
    /// Capabilities may be mode-dependent, so this precedes the query.
    ConfigureForRole { chip: u32, role: IfaceRole },
    /// Read the capability mask for the chip's current mode.
    QueryCapabilities { chip: u32, mode: u32 },
    /// Apply a transmit-power operating profile. Gated: the answer is
    /// a status code to assert on, not a failure.
    SelectPowerScenario { chip: u32, scenario: TxPowerScenario },
    /// Register a passive event observer under a client-chosen id.
    RegisterCallback { chip: u32, callback: u32 },
}

/// Service-to-client answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// Bare acknowledgement, only for `Reset`.
    Ack,
    /// Status-only answer.
    Status { status: StatusCode },
    /// Answer to `Acquire`; `chip` is present iff `status` is success.
    Chip { status: StatusCode, chip: Option<u32> },
    /// Answer to `ConfigureForRole`; `mode` is present iff `status` is
    /// success.
    Mode { status: StatusCode, mode: Option<u32> },
    /// Answer to `QueryCapabilities`; `caps` is the raw mask, zero on
    /// non-success.
    Capabilities { status: StatusCode, caps: u32 },
}

/// Unsolicited service-to-client notifications.
///
/// Delivery is asynchronous and unordered with respect to responses;
/// nothing in this crate waits for one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ChipReconfigured { mode: u32 },
    ChipReconfigureFailure { status: StatusCode },
    IfaceAdded { role: IfaceRole, name: String },
    IfaceRemoved { role: IfaceRole, name: String },
    DebugRingBufferData { ring: u32, len: u32 },
    DebugErrorAlert { error_code: i32, len: u32 },
    RadioModeChange { radios: u32 },
}

fn encode_payload<T: Serialize>(payload: &T) -> Result<Vec<u8>, EncodeError> {
    let body = postcard::to_stdvec(payload).map_err(|e| EncodeError::Payload(e.to_string()))?;
    if body.len() > MAX_BODY_LEN as usize {
        return Err(EncodeError::BodyTooLarge {
            len: body.len(),
            max: MAX_BODY_LEN as usize,
        });
    }
    Ok(body)
}

fn decode_payload<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, DecodeError> {
    postcard::from_bytes(bytes).map_err(|e| DecodeError::Payload(e.to_string()))
}

impl Request {
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode_payload(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode_payload(bytes)
    }

    /// Operation name for logs and error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            Request::Reset { .. } => "reset",
            Request::Acquire { .. } => "acquire",
            Request::ConfigureForRole { .. } => "configure_for_role",
            Request::QueryCapabilities { .. } => "query_capabilities",
            Request::SelectPowerScenario { .. } => "select_power_scenario",
            Request::RegisterCallback { .. } => "register_callback",
        }
    }
}

impl Response {
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode_payload(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode_payload(bytes)
    }
}

impl Event {
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode_payload(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode_payload(bytes)
    }
}
