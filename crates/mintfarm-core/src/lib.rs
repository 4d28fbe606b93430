//! # mintfarm-core
//! Foundation types, sub-account addressing and collaborator traits for Mintfarm.

pub mod address;
pub mod clock;
pub mod constants;
pub mod error;
pub mod memory;
pub mod traits;
pub mod types;
