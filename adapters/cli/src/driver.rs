//! Frame-driven state machine connecting the window to a [`Session`].

use std::time::Duration;

use anyhow::{Context, Result};
use snake_pilot_core::{Controller, DecisionContext, Direction, Event, Path, TerminalReason};
use snake_pilot_rendering::{Banner, FrameControl, FrameInput, Scene};
use snake_pilot_system_autopilot::Autopilot;
use snake_pilot_system_manual::ManualControl;
use snake_pilot_system_session::Session;
use snake_pilot_world::query;
use tracing::info;

/// How long the game-over banner stays up before the new-game prompt returns.
const GAME_OVER_HOLD: Duration = Duration::from_secs(2);

/// Player selected on the command line.
#[derive(Debug)]
pub(crate) enum Pilot {
    Manual(ManualControl),
    Autopilot(Autopilot),
}

impl Pilot {
    pub(crate) fn new(ai_player: bool) -> Self {
        if ai_player {
            Self::Autopilot(Autopilot::new())
        } else {
            Self::Manual(ManualControl::new())
        }
    }
}

impl Controller for Pilot {
    fn decide_next_direction(&mut self, context: &DecisionContext<'_>) -> Option<Direction> {
        match self {
            Self::Manual(manual) => manual.decide_next_direction(context),
            Self::Autopilot(autopilot) => autopilot.decide_next_direction(context),
        }
    }

    fn observe(&mut self, events: &[Event]) {
        match self {
            Self::Manual(manual) => manual.observe(events),
            Self::Autopilot(autopilot) => autopilot.observe(events),
        }
    }

    fn planned_path(&self) -> Option<&Path> {
        match self {
            Self::Manual(manual) => manual.planned_path(),
            Self::Autopilot(autopilot) => autopilot.planned_path(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Manual(manual) => manual.reset(),
            Self::Autopilot(autopilot) => autopilot.reset(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Prompt,
    Running,
    Paused,
    GameOver {
        reason: TerminalReason,
        shown: Duration,
    },
}

/// Owns the session and turns frame input into game cycles.
#[derive(Debug)]
pub(crate) struct GameDriver {
    session: Session<Pilot>,
    phase: Phase,
    accumulated: Duration,
    pending: Vec<Direction>,
}

impl GameDriver {
    /// Starts at the new-game prompt.
    pub(crate) fn new(session: Session<Pilot>) -> Self {
        Self {
            session,
            phase: Phase::Prompt,
            accumulated: Duration::ZERO,
            pending: Vec::new(),
        }
    }

    #[cfg(test)]
    fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    fn session(&self) -> &Session<Pilot> {
        &self.session
    }

    /// Handles one frame of input and advances the simulation when a tick is due.
    pub(crate) fn update(&mut self, dt: Duration, input: FrameInput) -> Result<FrameControl> {
        if input.quit {
            info!("quit requested");
            return Ok(FrameControl::Exit);
        }

        match self.phase {
            Phase::Prompt => {
                if input.confirm_new_game {
                    self.start_game()?;
                } else if input.decline_new_game {
                    return Ok(FrameControl::Exit);
                }
            }
            Phase::Running => {
                if input.restart {
                    self.restart()?;
                } else if input.pause_toggled {
                    self.phase = Phase::Paused;
                } else {
                    self.pending.extend(input.directions);
                    self.tick(dt)?;
                }
            }
            Phase::Paused => {
                if input.restart {
                    self.restart()?;
                } else if input.pause_toggled {
                    self.phase = Phase::Running;
                }
            }
            Phase::GameOver { reason, shown } => {
                if input.confirm_new_game {
                    self.start_game()?;
                } else if input.decline_new_game {
                    return Ok(FrameControl::Exit);
                } else {
                    let shown = shown + dt;
                    self.phase = if shown >= GAME_OVER_HOLD {
                        Phase::Prompt
                    } else {
                        Phase::GameOver { reason, shown }
                    };
                }
            }
        }

        Ok(FrameControl::Continue)
    }

    /// Copies the world into the scene drawn this frame.
    pub(crate) fn sync_scene(&self, scene: &mut Scene) {
        let world = self.session.world();
        scene.snake = query::body(world).iter().collect();
        scene.food = query::food(world);
        scene.path = self
            .session
            .planned_path()
            .map(|path| path.cells().to_vec())
            .unwrap_or_default();
        scene.score = self.session.score();
        scene.banner = match self.phase {
            Phase::Prompt => Some(Banner::NewGamePrompt),
            Phase::Running => None,
            Phase::Paused => Some(Banner::Paused),
            Phase::GameOver { reason, .. } => Some(Banner::GameOver(reason)),
        };
    }

    fn start_game(&mut self) -> Result<()> {
        if self.session.outcome().is_some() {
            let _ = self
                .session
                .restart()
                .context("failed to start a new game")?;
        } else {
            info!("new game started");
        }
        self.enter_running();
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        info!("restarting game");
        let _ = self.session.restart().context("failed to restart the game")?;
        self.enter_running();
        Ok(())
    }

    fn enter_running(&mut self) {
        self.phase = Phase::Running;
        self.accumulated = Duration::ZERO;
        self.pending.clear();
    }

    fn tick(&mut self, dt: Duration) -> Result<()> {
        let interval = self.session.tick_interval();
        self.accumulated += dt;
        if self.accumulated < interval {
            return Ok(());
        }
        // A long frame runs a single cycle; the backlog beyond one interval is dropped.
        self.accumulated = (self.accumulated - interval).min(interval);

        let report = self
            .session
            .run_cycle(&self.pending)
            .context("decision cycle failed")?;
        self.pending.clear();

        if let Some(reason) = report.status.terminal_reason() {
            self.phase = Phase::GameOver {
                reason,
                shown: Duration::ZERO,
            };
        }
        Ok(())
    }
}
