//! Integration test suite for Mintfarm.
//!
//! Drives the wallet manager end to end against the in-memory ledger and
//! bonus token, and attacks its batch invariants with randomized inputs.

pub mod helpers;
