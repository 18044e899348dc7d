//! Score-driven tick pacing.

use std::time::Duration;

/// Cycles per second at the start of every game.
pub const BASE_TICK_RATE: u32 = 4;

/// Fastest pace the game ever reaches.
pub const MAX_TICK_RATE: u32 = 15;

/// Score needed to gain one cycle per second.
pub const SCORE_PER_RATE_STEP: u64 = 1_000;

/// Cycles per second for the provided score.
///
/// Every full thousand points adds one cycle per second on top of
/// [`BASE_TICK_RATE`], capped at [`MAX_TICK_RATE`].
#[must_use]
pub fn tick_rate_for_score(score: u64) -> u32 {
    let steps = score / SCORE_PER_RATE_STEP;
    let rate = u64::from(BASE_TICK_RATE).saturating_add(steps);
    u32::try_from(rate.min(u64::from(MAX_TICK_RATE))).unwrap_or(MAX_TICK_RATE)
}

/// Wall-clock time between two cycles for the provided score.
#[must_use]
pub fn tick_interval_for_score(score: u64) -> Duration {
    Duration::from_secs(1) / tick_rate_for_score(score)
}
