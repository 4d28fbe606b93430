//! # mintfarm-curve: Decaying bonus-mint curve.
//!
//! All calculations use integer arithmetic only for determinism.
//!
//! - **Cumulative table**: 250 weekly entries of a geometric series with ratio
//!   0.95, precomputed offline and embedded as a constant.
//! - **Weekly multiplier**: the increment unlocked during one week of protocol
//!   age, `table[w] - table[w - 1]`. Zero once the table horizon has passed.
//! - **Bonus amount**: `raw * weekly_multiplier / 10^9`, floored.

pub mod engine;
pub mod table;

pub use engine::CurveEngine;
pub use table::{CURVE_WEEKS, CUMULATIVE_WEEKLY_MULTIPLIER, SERIES_LIMIT};
