//! Window-free autopilot runs.

use anyhow::{Context, Result};
use snake_pilot_core::{GameConfig, TerminalReason};
use snake_pilot_system_autopilot::Autopilot;
use snake_pilot_system_session::Session;
use tracing::info;

/// Result of a headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) cycles: u64,
    pub(crate) score: u64,
    pub(crate) outcome: Option<TerminalReason>,
}

/// Lets the autopilot play until the game ends or `max_cycles` cycles have run.
pub(crate) fn run(config: GameConfig, max_cycles: u64) -> Result<RunSummary> {
    let mut session =
        Session::new(config, Autopilot::new()).context("failed to create the session")?;

    while session.outcome().is_none() && session.cycles() < max_cycles {
        let _ = session.run_cycle(&[]).context("decision cycle failed")?;
    }

    let summary = RunSummary {
        cycles: session.cycles(),
        score: session.score(),
        outcome: session.outcome(),
    };
    match summary.outcome {
        Some(reason) => info!(
            cycles = summary.cycles,
            score = summary.score,
            "headless run finished: {}",
            reason.message()
        ),
        None => info!(
            cycles = summary.cycles,
            score = summary.score,
            "headless run reached the cycle limit"
        ),
    }
    Ok(summary)
}
