//! Curve engine implementing the [`RewardCurve`] trait.
//!
//! Maps protocol age to the bonus multiplier through the embedded table.
//! All arithmetic is integer-only with u128 intermediates for overflow safety.

use mintfarm_core::constants::{MULTIPLIER_PRECISION, SECONDS_PER_WEEK};
use mintfarm_core::error::CurveError;
use mintfarm_core::traits::RewardCurve;
use tracing::trace;

use crate::table::{cumulative_at, weekly_at};

/// The production reward curve.
///
/// Implements [`RewardCurve`] with:
/// - Week counting from the deploy timestamp, not from a position's creation
/// - Table lookups only, no floating point
/// - A hard close of the bonus window after the table horizon
#[derive(Debug, Clone, Default)]
pub struct CurveEngine;

impl CurveEngine {
    /// Create a new CurveEngine.
    pub fn new() -> Self {
        Self
    }
}

impl RewardCurve for CurveEngine {
    fn elapsed_weeks(&self, now: u64, deploy_ts: u64) -> u64 {
        now.saturating_sub(deploy_ts) / SECONDS_PER_WEEK
    }

    fn cumulative_multiplier(&self, week: u64) -> u64 {
        cumulative_at(week)
    }

    fn weekly_multiplier(&self, week: u64) -> u64 {
        weekly_at(week)
    }

    fn bonus_amount(&self, raw_amount: u128, week: u64) -> Result<u128, CurveError> {
        let multiplier = weekly_at(week);
        if multiplier == 0 || raw_amount == 0 {
            return Ok(0);
        }
        let bonus = raw_amount
            .checked_mul(multiplier as u128)
            .ok_or(CurveError::ArithmeticOverflow)?
            / MULTIPLIER_PRECISION as u128;
        trace!(%raw_amount, week, multiplier, %bonus, "curve: bonus computed");
        Ok(bonus)
    }
}
