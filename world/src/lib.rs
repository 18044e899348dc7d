#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Snake Pilot.

pub mod movement;

use snake_pilot_core::{
    BoundedHistory, CellCoord, Command, CoreError, Event, GameConfig, Grid, Marker,
    PlacementError,
};
use tracing::debug;

use self::movement::SnakeState;

/// Represents the authoritative Snake Pilot world state.
#[derive(Clone, Debug)]
pub struct World {
    config: GameConfig,
    grid: Grid,
    snake: SnakeState,
}

impl World {
    /// Creates a world laid out according to `config`.
    pub fn new(config: GameConfig) -> Result<Self, CoreError> {
        let (grid, snake) = build(&config)?;
        Ok(Self {
            config,
            grid,
            snake,
        })
    }

    fn reset(&mut self) -> Result<(), CoreError> {
        let (grid, snake) = build(&self.config)?;
        self.grid = grid;
        self.snake = snake;
        Ok(())
    }

    fn place_food(&mut self, cell: CellCoord) -> Result<(), PlacementError> {
        if !self.grid.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if self.snake.body().contains(cell) {
            return Err(PlacementError::Occupied);
        }
        if self.grid.food_cells().next().is_some() {
            return Err(PlacementError::AlreadyPresent);
        }

        self.grid
            .set_marker(cell, Marker::Food)
            .map(|_| ())
            .map_err(|_| PlacementError::OutOfBounds)
    }
}

fn build(config: &GameConfig) -> Result<(Grid, SnakeState), CoreError> {
    config.validate()?;
    let grid = Grid::new(config.columns, config.rows)?;
    let body = BoundedHistory::new(config.starting_body.iter().copied())?;
    let snake = SnakeState::new(body, &grid);
    Ok((grid, snake))
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Errors are reserved for broken core invariants; ordinary rejections and
/// terminal conditions are reported through `out_events`.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), CoreError> {
    match command {
        Command::Steer { direction } => {
            if world.snake.steer(direction) {
                out_events.push(Event::HeadingChanged { direction });
            }
        }
        Command::Advance => {
            let _ = movement::step(&mut world.snake, &mut world.grid, out_events)?;
        }
        Command::PlaceFood { cell } => match world.place_food(cell) {
            Ok(()) => {
                debug!(?cell, "food placed");
                out_events.push(Event::FoodPlaced { cell });
            }
            Err(reason) => out_events.push(Event::FoodPlacementRejected { cell, reason }),
        },
        Command::ClearFood => {
            let count = world.grid.clear_markers();
            if count > 0 {
                out_events.push(Event::FoodCleared { count });
            }
        }
        Command::Reset => {
            world.reset()?;
            out_events.push(Event::WorldReset);
        }
    }

    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use snake_pilot_core::{
        BoundedHistory, CellCoord, DecisionContext, Direction, GameConfig, Grid, SnakeStatus,
        SnakeView, SCORE_PER_SEGMENT,
    };

    use super::World;

    /// Configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides read-only access to the board.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Provides read-only access to the snake's body, head first.
    #[must_use]
    pub fn body(world: &World) -> &BoundedHistory {
        world.snake.body()
    }

    /// Captures a read-only view of the snake.
    #[must_use]
    pub fn snake_view(world: &World) -> SnakeView<'_> {
        world.snake.view()
    }

    /// Lifecycle state of the snake.
    #[must_use]
    pub fn status(world: &World) -> SnakeStatus {
        world.snake.status()
    }

    /// Current score, derived from the body capacity.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        let capacity = u64::try_from(world.snake.body().capacity()).unwrap_or(u64::MAX);
        capacity.saturating_mul(SCORE_PER_SEGMENT)
    }

    /// The food cell, if one is placed. The first in row-major order wins.
    #[must_use]
    pub fn food(world: &World) -> Option<CellCoord> {
        world.grid.food_cells().next()
    }

    /// Cells not covered by the snake, in row-major order.
    #[must_use]
    pub fn free_cells(world: &World) -> Vec<CellCoord> {
        let body = world.snake.body();
        world
            .grid
            .all_cells()
            .filter(|cell| !body.contains(*cell))
            .collect()
    }

    /// Bundles the state a controller needs for its next decision.
    #[must_use]
    pub fn decision_context<'a>(world: &'a World, input: &'a [Direction]) -> DecisionContext<'a> {
        DecisionContext {
            grid: &world.grid,
            snake: world.snake.view(),
            input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_pilot_core::Direction;

    #[test]
    fn steering_reports_only_changes() {
        let mut world = World::new(GameConfig::default()).expect("valid config");
        let mut events = Vec::new();

        apply(&mut world, Command::Steer { direction: Direction::Down }, &mut events)
            .expect("apply");
        apply(&mut world, Command::Steer { direction: Direction::Down }, &mut events)
            .expect("apply");

        assert_eq!(
            events,
            vec![Event::HeadingChanged {
                direction: Direction::Down
            }]
        );
    }

    #[test]
    fn reset_restores_configured_body_and_clears_food() {
        let mut world = World::new(GameConfig::default()).expect("valid config");
        let mut events = Vec::new();
        apply(&mut world, Command::PlaceFood { cell: CellCoord::new(8, 8) }, &mut events)
            .expect("apply");
        apply(&mut world, Command::Steer { direction: Direction::Down }, &mut events)
            .expect("apply");
        apply(&mut world, Command::Advance, &mut events).expect("apply");

        events.clear();
        apply(&mut world, Command::Reset, &mut events).expect("apply");

        assert_eq!(events, vec![Event::WorldReset]);
        assert_eq!(
            query::body(&world).iter().collect::<Vec<_>>(),
            GameConfig::default().starting_body
        );
        assert_eq!(query::food(&world), None);
        assert_eq!(query::snake_view(&world).heading(), None);
    }
}
