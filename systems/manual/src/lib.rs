#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input-driven controller for a human player.

use snake_pilot_core::{Controller, DecisionContext, Direction};

/// Human player that forwards the most recent directional input.
///
/// Inputs are never buffered across cycles: when several arrive between two
/// decisions only the last one counts, and a cycle without input keeps the
/// snake's current heading.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualControl;

impl ManualControl {
    /// Creates the controller.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Controller for ManualControl {
    fn decide_next_direction(&mut self, context: &DecisionContext<'_>) -> Option<Direction> {
        context.input.last().copied()
    }
}
