//! wifihal-testkit: reference services for exercising the chip contract.
//!
//! [`FakeChip`] is an in-process [`ChipService`](wifihal_core::ChipService)
//! with a configurable capability mask, the knob a conformance instance
//! varies. [`MisbehavingChip`] wraps it and answers gated operations with
//! a fixed wrong status, for negative tests of the suite itself.
//! [`serve_instance`] puts either on a loopback TCP listener so tests
//! cover the full wire path.
//!
//! ```ignore
//! use std::sync::Arc;
//! use wifihal_core::CapabilityMask;
//! use wifihal_testkit::{serve_instance, FakeChip};
//!
//! let chip = FakeChip::new("wifi0", CapabilityMask::SET_TX_POWER_LIMIT);
//! let events = chip.events().clone();
//! let served = serve_instance(Arc::new(chip), events)?;
//! let addr = served.addr(); // connect a ChipController here
//! ```

#![forbid(unsafe_code)]

mod fake;
mod serve;

pub use fake::{FakeChip, MisbehavingChip};
pub use serve::{serve_instance, ServedInstance};
