#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game loop orchestration for Snake Pilot.
//!
//! A [`Session`] owns the authoritative world, the controller that steers the
//! snake and the seeded generator that places food. Each call to
//! [`Session::run_cycle`] executes one complete decision cycle: the
//! controller decides, the world advances, terminal conditions are recorded,
//! and fresh food is placed once the previous piece was eaten. Timing is left
//! to the caller, which paces cycles with [`Session::tick_interval`].

pub mod pacing;

use std::time::Duration;

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_pilot_core::{
    CellCoord, Command, Controller, CoreError, Direction, Event, GameConfig, Path, SnakeStatus,
    TerminalReason,
};
use snake_pilot_world::{self as world, query, World};
use tracing::{debug, info};

/// Summary of a single decision cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Direction chosen by the controller, if any.
    pub decision: Option<Direction>,
    /// Events emitted by the world during the cycle.
    pub events: Vec<Event>,
    /// Lifecycle state after the cycle.
    pub status: SnakeStatus,
    /// Score after the cycle.
    pub score: u64,
    /// Cycles per second the score now calls for.
    pub tick_rate: u32,
    /// Route the controller is following, if it plans one.
    pub path: Option<Path>,
}

impl CycleReport {
    /// Reports whether the game ended during or before this cycle.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Food cell placed during the cycle, if any.
    #[must_use]
    pub fn food_placed(&self) -> Option<CellCoord> {
        self.events.iter().find_map(|event| match event {
            Event::FoodPlaced { cell } => Some(*cell),
            _ => None,
        })
    }
}

/// Single-player game driven by a [`Controller`].
#[derive(Debug)]
pub struct Session<C> {
    world: World,
    controller: C,
    rng: ChaCha8Rng,
    outcome: Option<TerminalReason>,
    cycles: u64,
}

impl<C: Controller> Session<C> {
    /// Builds the world described by `config` and places the first food.
    pub fn new(config: GameConfig, controller: C) -> Result<Self, CoreError> {
        let rng = ChaCha8Rng::seed_from_u64(config.food_seed);
        let world = World::new(config)?;
        let mut session = Self {
            world,
            controller,
            rng,
            outcome: None,
            cycles: 0,
        };
        let mut events = Vec::new();
        session.start(&mut events)?;
        Ok(session)
    }

    /// Returns the world and controller to their starting state and places new food.
    ///
    /// The food generator keeps its sequence, so consecutive games differ.
    pub fn restart(&mut self) -> Result<Vec<Event>, CoreError> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Reset, &mut events)?;
        self.controller.reset();
        self.outcome = None;
        self.cycles = 0;
        self.start(&mut events)?;
        self.controller.observe(&events);
        info!("new game started");
        Ok(events)
    }

    /// Executes one decision cycle with the directional input gathered since the last one.
    ///
    /// Once the game is over the world is left untouched and every further
    /// cycle reports the stored outcome until [`Session::restart`].
    pub fn run_cycle(&mut self, input: &[Direction]) -> Result<CycleReport, CoreError> {
        if self.outcome.is_some() {
            return Ok(self.report(None, Vec::new()));
        }

        self.cycles += 1;
        let decision = self
            .controller
            .decide_next_direction(&query::decision_context(&self.world, input));

        let mut events = Vec::new();
        if let Some(direction) = decision {
            world::apply(&mut self.world, Command::Steer { direction }, &mut events)?;
        }
        world::apply(&mut self.world, Command::Advance, &mut events)?;

        let game_over = events.iter().find_map(|event| match event {
            Event::GameOver { reason } => Some(*reason),
            _ => None,
        });

        if let Some(reason) = game_over {
            self.outcome = Some(reason);
            info!(
                cycles = self.cycles,
                score = query::score(&self.world),
                "game over: {}",
                reason.message()
            );
        } else if query::food(&self.world).is_none() {
            self.place_food(&mut events)?;
        }

        self.controller.observe(&events);
        Ok(self.report(decision, events))
    }

    /// Read-only access to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Controller steering the snake.
    #[must_use]
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Reason the current game ended, if it has.
    #[must_use]
    pub fn outcome(&self) -> Option<TerminalReason> {
        self.outcome
    }

    /// Number of cycles executed in the current game.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u64 {
        query::score(&self.world)
    }

    /// Cycles per second for the current score.
    #[must_use]
    pub fn tick_rate(&self) -> u32 {
        pacing::tick_rate_for_score(self.score())
    }

    /// Time the caller should wait between cycles at the current score.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        pacing::tick_interval_for_score(self.score())
    }

    /// Route the controller is following, if it plans one.
    #[must_use]
    pub fn planned_path(&self) -> Option<&Path> {
        self.controller.planned_path()
    }

    fn start(&mut self, events: &mut Vec<Event>) -> Result<(), CoreError> {
        if let Some(reason) = query::status(&self.world).terminal_reason() {
            info!("starting body is already terminal: {}", reason.message());
            self.outcome = Some(reason);
            return Ok(());
        }
        self.place_food(events)
    }

    fn place_food(&mut self, events: &mut Vec<Event>) -> Result<(), CoreError> {
        let free = query::free_cells(&self.world);
        let Some(&cell) = free.choose(&mut self.rng) else {
            debug!("no free cell left for food");
            return Ok(());
        };
        world::apply(&mut self.world, Command::PlaceFood { cell }, events)
    }

    fn report(&self, decision: Option<Direction>, events: Vec<Event>) -> CycleReport {
        let score = self.score();
        CycleReport {
            decision,
            events,
            status: query::status(&self.world),
            score,
            tick_rate: pacing::tick_rate_for_score(score),
            path: self.controller.planned_path().cloned(),
        }
    }
}
