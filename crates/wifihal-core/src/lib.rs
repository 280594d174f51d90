//! wifihal-core: Core types and plumbing for the wifihal chip control contract.
//!
//! This crate defines:
//! - Status codes and capability bits ([`StatusCode`], [`CapabilityMask`])
//! - Contract identifiers ([`InstanceId`], [`ChipHandle`], [`ChipModeId`],
//!   [`IfaceRole`], [`TxPowerScenario`])
//! - The wire format ([`FrameHeader`], [`read_frame`], [`write_frame`])
//! - Request/response/event payloads ([`Request`], [`Response`], [`Event`])
//! - Synchronous transports ([`Transport`])
//! - The typed client ([`ChipController`]) and service side
//!   ([`ChipService`], [`serve_connection`])
//! - The passive notification observer ([`ChipEventObserver`])
//!
//! The contract is strictly request/response: every operation is one
//! blocking round trip with no retries and no timeouts. Unsolicited event
//! frames may arrive at any point; the client forwards them to the
//! registered observer and otherwise ignores them.

#![forbid(unsafe_code)]

mod caps;
mod client;
mod control;
mod error;
mod observer;
mod service;
mod status;
mod transport;
mod types;
mod wire;

pub use caps::*;
pub use client::*;
pub use control::*;
pub use error::*;
pub use observer::*;
pub use service::*;
pub use status::*;
pub use transport::*;
pub use types::*;
pub use wire::*;
