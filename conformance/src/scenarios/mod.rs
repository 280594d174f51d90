//! The registered scenario set.
//!
//! Each module covers one category of the contract. Scenarios register
//! themselves with `inventory::submit!` and are collected through
//! [`crate::Scenario`]; nothing here is called directly.

pub mod callback;
pub mod lifecycle;
pub mod power;
